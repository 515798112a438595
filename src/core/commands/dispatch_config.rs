// Process-wide dispatch settings, fixed before the dispatcher is built.

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_SYNTAX_ERROR: &str = "Incorrect usage! Please use \"{PREFIX}{COMMAND}{ARGUMENTS}\"";
pub const DEFAULT_DISABLED_NOTICE: &str = "That command is disabled in this server.";

/// How the text after the prefix is split into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tokenizer {
    /// Split on runs of whitespace. `"a  b"` is two tokens.
    #[default]
    Whitespace,
    /// Split on every single space. `"a  b"` is three tokens, the middle one empty.
    SingleSpace,
}

impl Tokenizer {
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self {
            Tokenizer::Whitespace => text.split_whitespace().collect(),
            Tokenizer::SingleSpace => text.split(' ').collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    default_prefix: String,
    syntax_error: String,
    disabled_notice: String,
    tokenizer: Tokenizer,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_prefix: DEFAULT_PREFIX.to_string(),
            syntax_error: DEFAULT_SYNTAX_ERROR.to_string(),
            disabled_notice: DEFAULT_DISABLED_NOTICE.to_string(),
            tokenizer: Tokenizer::default(),
        }
    }
}

impl DispatchConfig {
    pub fn with_default_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.default_prefix = prefix.into();
        self
    }

    pub fn with_syntax_error(mut self, template: impl Into<String>) -> Self {
        self.syntax_error = template.into();
        self
    }

    pub fn with_disabled_notice(mut self, notice: impl Into<String>) -> Self {
        self.disabled_notice = notice.into();
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn default_prefix(&self) -> &str {
        &self.default_prefix
    }

    /// Template used when a command has no syntax error of its own.
    pub fn syntax_error(&self) -> &str {
        &self.syntax_error
    }

    pub fn disabled_notice(&self) -> &str {
        &self.disabled_notice
    }

    pub fn tokenizer(&self) -> Tokenizer {
        self.tokenizer
    }
}

/// Fill in `{PREFIX}`, `{COMMAND}` and `{ARGUMENTS}`.
///
/// `{ARGUMENTS}` becomes `" <expected>"` (or nothing), and a space written in
/// front of the placeholder is absorbed so it never doubles up.
pub fn render_syntax_error(
    template: &str,
    prefix: &str,
    command: &str,
    expected_args: Option<&str>,
) -> String {
    let arguments = expected_args
        .map(|expected| format!(" {}", expected))
        .unwrap_or_default();

    template
        .replace("{PREFIX}", prefix)
        .replace("{COMMAND}", command)
        .replace(" {ARGUMENTS}", &arguments)
        .replace("{ARGUMENTS}", &arguments)
}
