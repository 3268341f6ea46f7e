use crate::GuideError;

#[allow(async_fn_in_trait)]
pub trait GuideService {
    /// Markdown instructions on how to perform the named exercise.
    async fn get_guide(&self, exercise_name: &str) -> Result<String, GuideError>;
}

#[allow(async_fn_in_trait)]
pub trait GuideRepository {
    async fn request_guide(&self, prompt: &str) -> Result<String, GuideError>;
}

pub const GUIDE_SECTIONS: [&str; 5] = [
    "# Equipment Required",
    "# Instructions",
    "## Tips",
    "## Variations",
    "## Safety",
];

pub fn guide_prompt(exercise_name: &str) -> Result<String, GuideError> {
    let exercise_name = exercise_name.trim();

    if exercise_name.is_empty() {
        return Err(GuideError::EmptyExerciseName);
    }

    Ok(format!(
        "You are a fitness coach.\n\
         You are given an exercise, provide clear instructions on how to perform the exercise. \
         Include if any equipment is required. Explain the exercise in detail and for a \
         beginner.\n\n\
         The exercise name is: {exercise_name}\n\n\
         Keep it short and concise. Use markdown formatting.\n\n\
         Use the following format:\n\n\
         {}\n\n\
         keep spacing between the headings and the content.\n\n\
         Always use headings and subheadings.\n",
        GUIDE_SECTIONS.join("\n\n")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_prompt() {
        let prompt = guide_prompt("  Bench Press ").unwrap();
        assert!(prompt.starts_with("You are a fitness coach.\n"));
        assert!(prompt.contains("The exercise name is: Bench Press\n"));
        for section in GUIDE_SECTIONS {
            assert!(prompt.contains(&format!("{section}\n")), "{section}");
        }
    }

    #[test]
    fn test_guide_prompt_empty_name() {
        assert!(matches!(
            guide_prompt("   "),
            Err(GuideError::EmptyExerciseName)
        ));
    }
}
