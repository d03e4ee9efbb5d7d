//! Interactive prompts.
//!
//! The session talks to the user through [`Prompter`] so the whole flow can
//! be driven by a script in tests.

use std::net::IpAddr;

use addrpush::{classify, AddressKind};
use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input, Password};

/// Longest accepted username
pub const MAX_USERNAME_LEN: usize = 63;

/// Source of answers to interactive questions
pub trait Prompter {
    /// Free text answer, trimmed.
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Hidden answer.
    fn password(&mut self, prompt: &str) -> Result<String>;

    /// Yes/no answer.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Index of the chosen item.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;
}

/// Terminal prompts backed by dialoguer
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?.trim().to_string())
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        Ok(Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        Ok(FuzzySelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?)
    }
}

/// Device address: an IP address or an FQDN.
pub fn check_host(host: &str) -> Result<(), String> {
    if host.parse::<IpAddr>().is_ok() || matches!(classify::detect(host), Some((AddressKind::Fqdn, _))) {
        Ok(())
    } else {
        Err(format!("'{host}' is not an IP address or FQDN"))
    }
}

/// Administrator username: printable, no whitespace.
pub fn check_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("username cannot be empty".into());
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(format!("username is longer than {MAX_USERNAME_LEN} characters"));
    }
    if username.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err("username cannot contain whitespace".into());
    }
    Ok(())
}

/// Ask until `check` accepts the answer.
pub fn input_checked<P, F>(prompter: &mut P, prompt: &str, default: Option<&str>, check: F) -> Result<String>
where
    P: Prompter + ?Sized,
    F: Fn(&str) -> Result<(), String>,
{
    loop {
        let answer = prompter.input(prompt, default)?;
        match check(&answer) {
            Ok(()) => return Ok(answer),
            Err(problem) => crate::output::warn(&problem),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::scripted::{text, ScriptedPrompter};
    use super::*;

    #[test]
    fn test_check_host() {
        assert!(check_host("10.0.0.1").is_ok());
        assert!(check_host("fw1.example.net").is_ok());
        assert!(check_host("2001:db8::1").is_ok());
        assert!(check_host("not a host").is_err());
        assert!(check_host("").is_err());
    }

    #[test]
    fn test_check_username() {
        assert!(check_username("admin").is_ok());
        assert!(check_username("svc.automation@corp").is_ok());
        assert!(check_username("").is_err());
        assert!(check_username("two words").is_err());
        assert!(check_username(&"a".repeat(64)).is_err());
    }

    #[test]
    fn test_input_checked_retries() {
        let mut prompter = ScriptedPrompter::new([text("bad host!"), text("fw1.example.net")]);
        let host = input_checked(&mut prompter, "Host", None, check_host).unwrap();
        assert_eq!(host, "fw1.example.net");
        assert_eq!(prompter.asked.len(), 2);
    }

    #[test]
    fn test_empty_text_takes_default() {
        let mut prompter = ScriptedPrompter::new([text("")]);
        assert_eq!(prompter.input("User", Some("admin")).unwrap(), "admin");
    }
}
