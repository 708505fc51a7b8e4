/// Build the instruction text that precedes the inline frame images.
pub fn build(frame_count: usize, title: &str, description: &str, question: &str) -> String {
    format!(
        "You are an AI assistant analyzing a video.\n\
         I have provided {frame_count} screenshots taken from the video at different intervals \
         to give you visual context.\n\
         \n\
         Video Metadata:\n\
         - Title: \"{title}\"\n\
         - Description: \"{description}\"\n\
         \n\
         User Question: \"{question}\"\n\
         \n\
         Answer the user's question based strictly on the visual context of the images and the \
         metadata provided.\n\
         Keep the answer concise, friendly, and helpful."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_metadata_and_question() {
        let text = build(3, "Demo", "A short demo", "What color is the car?");
        assert!(text.contains("3 screenshots"));
        assert!(text.contains("Title: \"Demo\""));
        assert!(text.contains("Description: \"A short demo\""));
        assert!(text.contains("User Question: \"What color is the car?\""));
    }

    #[test]
    fn prompt_tolerates_empty_description() {
        let text = build(5, "Demo", "", "Anything?");
        assert!(text.contains("Description: \"\""));
    }
}
