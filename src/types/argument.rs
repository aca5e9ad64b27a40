use super::{Localizations, localized};

/// A fixed choice offered for a slash command argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub name: String,
    /// The underlying value, stringified for display.
    pub value: String,
}

/// A slash command argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub choices: Vec<Choice>,
    pub name_localizations: Option<Localizations>,
    pub description_localizations: Option<Localizations>,
}

impl Argument {
    /// The localized name for `locale`, or the plain name if no translation
    /// exists.
    pub fn localized_name(&self, locale: &str) -> &str {
        localized(self.name_localizations.as_ref(), locale, &self.name)
    }

    /// The localized description for `locale`, falling back to the plain
    /// description.
    pub fn localized_description(&self, locale: &str) -> &str {
        localized(
            self.description_localizations.as_ref(),
            locale,
            &self.description,
        )
    }

    /// A copy of this argument with its name and description swapped for the
    /// `locale` translations.
    pub fn localize(&self, locale: &str) -> Self {
        Self {
            name: self.localized_name(locale).to_owned(),
            description: self.localized_description(locale).to_owned(),
            ..self.clone()
        }
    }
}

impl std::fmt::Display for Argument {
    /// Renders `[name]` for required arguments and `(name)` for optional
    /// ones, matching the embed footer legend.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.required {
            write!(f, "[{}]", self.name)
        } else {
            write!(f, "({})", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn argument() -> Argument {
        Argument {
            name: "user".into(),
            description: "The user to target.".into(),
            required: true,
            choices: vec![],
            name_localizations: Some(HashMap::from_iter([(
                "fr".to_owned(),
                "utilisateur".to_owned(),
            )])),
            description_localizations: None,
        }
    }

    #[test]
    fn display_brackets_follow_required_flag() {
        let mut arg = argument();
        assert_eq!(arg.to_string(), "[user]");

        arg.required = false;
        assert_eq!(arg.to_string(), "(user)");
    }

    #[test]
    fn localization_falls_back_when_missing() {
        let arg = argument();
        assert_eq!(arg.localized_name("fr"), "utilisateur");
        assert_eq!(arg.localized_name("de"), "user");
        assert_eq!(arg.localized_description("fr"), "The user to target.");
    }

    #[test]
    fn localize_substitutes_in_place() {
        let localized = argument().localize("fr");
        assert_eq!(localized.name, "utilisateur");
        assert_eq!(localized.description, "The user to target.");
        assert!(localized.required);
    }
}
