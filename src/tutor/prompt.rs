const PLATFORM: &str = "Masomohub";

/// Wraps a student's question in the tutor persona.
pub fn build_prompt(message: &str) -> String {
    format!(
        "You are a helpful and encouraging AI tutor for a platform called {PLATFORM}.\n\
         The student asks: \"{message}\".\n\
         Answer briefly, clearly, and in a friendly tone."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_quoted_inside_persona() {
        let p = build_prompt("What is a flexbox?");
        assert!(p.starts_with("You are a helpful and encouraging AI tutor for a platform called Masomohub."));
        assert!(p.contains("The student asks: \"What is a flexbox?\"."));
        assert!(p.ends_with("friendly tone."));
    }
}
