use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Confirm};

static CHECK: Emoji<'_, '_> = Emoji("✔ ", "");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "! ");
static CROSS: Emoji<'_, '_> = Emoji("✖ ", "x ");

/// Status messages go to stderr so that rendered output on stdout can be piped.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ui;

impl Ui {
	pub fn success(&self, message: &str) {
		eprintln!("{}{}", style(CHECK).green(), message);
	}

	pub fn warning(&self, message: &str) {
		eprintln!("{}{}", style(WARN).yellow(), style(message).yellow());
	}

	pub fn error(&self, message: &str) {
		eprintln!("{}{}", style(CROSS).red().bold(), style(message).red());
	}

	pub fn confirm(&self, prompt: &str) -> std::io::Result<bool> {
		Confirm::with_theme(&ColorfulTheme::default())
			.with_prompt(prompt)
			.default(false)
			.interact()
	}
}
