//! Request forms and their validation schema.
//!
//! Forms hold exactly what the user typed. `validate` is the only way to get
//! a sendable value out of them.

use crate::types::{Amount, ImageGenerationRequest, Resolution};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Prompt is required.")]
    PromptRequired,
}

fn require_prompt(prompt: &str) -> Result<String, FormError> {
    if prompt.trim().is_empty() {
        return Err(FormError::PromptRequired);
    }
    Ok(prompt.to_owned())
}

/// Single-prompt form used by the chat-style pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptForm {
    pub prompt: String,
}

impl PromptForm {
    /// # Errors
    ///
    /// Returns [`FormError::PromptRequired`] if the prompt is blank.
    pub fn validate(&self) -> Result<String, FormError> {
        require_prompt(&self.prompt)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Image form: prompt plus amount and resolution pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageForm {
    pub prompt: String,
    pub amount: Amount,
    pub resolution: Resolution,
}

impl ImageForm {
    /// # Errors
    ///
    /// Returns [`FormError::PromptRequired`] if the prompt is blank.
    pub fn validate(&self) -> Result<ImageGenerationRequest, FormError> {
        Ok(ImageGenerationRequest {
            prompt: require_prompt(&self.prompt)?,
            amount: self.amount,
            resolution: self.resolution,
        })
    }

    /// Back to defaults: empty prompt, one image, 512x512.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_prompt_fails() {
        let form = PromptForm { prompt: " \n\t".into() };
        assert_eq!(form.validate(), Err(FormError::PromptRequired));
    }

    #[test]
    fn prompt_is_kept_verbatim() {
        let form = PromptForm { prompt: " 2+2? ".into() };
        assert_eq!(form.validate().unwrap(), " 2+2? ");
    }

    #[test]
    fn prompt_reset_clears() {
        let mut form = PromptForm { prompt: "hi".into() };
        form.reset();
        assert!(form.prompt.is_empty());
    }

    #[test]
    fn image_defaults() {
        let form = ImageForm::default();
        assert_eq!(form.amount.as_str(), "1");
        assert_eq!(form.resolution.as_str(), "512x512");
    }

    #[test]
    fn image_validate_builds_request() {
        let form = ImageForm { prompt: "a red cube".into(), amount: Amount::Two, resolution: Resolution::Medium };
        let req = form.validate().unwrap();
        assert_eq!(req.prompt, "a red cube");
        assert_eq!(req.amount, Amount::Two);
    }

    #[test]
    fn image_validate_requires_prompt() {
        assert_eq!(ImageForm::default().validate(), Err(FormError::PromptRequired));
    }

    #[test]
    fn image_reset_restores_defaults() {
        let mut form = ImageForm { prompt: "x".into(), amount: Amount::Five, resolution: Resolution::Large };
        form.reset();
        assert_eq!(form, ImageForm::default());
    }
}
