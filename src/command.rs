//! Slash-command receiving and parameter parsing.
//!
//! A [`SlashCommand`] wraps one inbound command payload. Parameters are
//! declared one at a time and parsed immediately against the command text,
//! so every declaration returns its parse outcome right away and the
//! command is never observable in a declared-but-unparsed state.

use crate::error::{Result, SynoChatError};
use crate::types::{CommandResponse, SlashCommandPayload};

/// Values a parameter will accept.
#[derive(Debug, Clone)]
pub enum AcceptedValues {
    /// Any value, or no value at all.
    Any,
    /// Only the listed literal values.
    OneOf(Vec<String>),
}

impl AcceptedValues {
    /// Build an explicit value set from anything iterable over strings.
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AcceptedValues::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Whether `candidate` satisfies this constraint.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            AcceptedValues::Any => true,
            AcceptedValues::OneOf(values) => values.iter().any(|value| value == candidate),
        }
    }
}

impl From<&str> for AcceptedValues {
    /// Parse a `"red|green|blue"` alternation into a value set.
    fn from(alternation: &str) -> Self {
        AcceptedValues::one_of(alternation.split('|'))
    }
}

/// One declared slash-command parameter and its parse outcome.
///
/// `detected` records whether the parameter appeared in the command text at
/// all; `valid` records whether its value satisfies the declared
/// [`AcceptedValues`]. For required parameters absence is an error instead,
/// so a `Parameter` for one always has `detected` set.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    optional: bool,
    accepted: AcceptedValues,
    value: Option<String>,
    detected: bool,
    valid: bool,
}

impl Parameter {
    fn new(name: &str, optional: bool, accepted: AcceptedValues) -> Self {
        Self {
            name: name.to_owned(),
            optional,
            accepted,
            value: None,
            detected: false,
            valid: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn optional(&self) -> bool {
        self.optional
    }

    pub fn accepted(&self) -> &AcceptedValues {
        &self.accepted
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn detected(&self) -> bool {
        self.detected
    }

    pub fn valid(&self) -> bool {
        self.valid
    }

    /// Whether `candidate` is within this parameter's accepted values.
    pub fn matches(&self, candidate: &str) -> bool {
        self.accepted.matches(candidate)
    }

    /// Whether `token` names this parameter, either bare (`delay`) or with
    /// an attached value (`delay=5`). A token that merely contains the
    /// name somewhere inside does not count; earlier revisions of this
    /// library matched on substrings, which let a parameter named `id`
    /// claim the token `valid=1`.
    fn claims(&self, token: &str) -> bool {
        match token.strip_prefix(self.name.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with('='),
            None => false,
        }
    }
}

/// Extract the right-hand side of a `name=value` token. Exactly one `=`
/// yields a value, possibly empty; a bare name or a repeated `=` yields
/// none.
fn split_value(token: &str) -> Option<String> {
    let mut parts = token.split('=');
    let _name = parts.next();
    match (parts.next(), parts.next()) {
        (Some(value), None) => Some(value.to_owned()),
        _ => None,
    }
}

/// An inbound slash command.
///
/// Wraps the payload the chat server posted plus the locally configured
/// token to authenticate it against.
#[derive(Debug, Clone)]
pub struct SlashCommand {
    client_token: String,
    server_token: String,
    user_id: String,
    username: String,
    text: String,
    parameters: Vec<Parameter>,
}

impl SlashCommand {
    /// Wrap a decoded payload together with the locally configured token.
    pub fn new(payload: SlashCommandPayload, token: impl Into<String>) -> Self {
        let command = Self {
            client_token: token.into(),
            server_token: payload.token,
            user_id: payload.user_id,
            username: payload.username,
            text: payload.text,
            parameters: Vec::new(),
        };
        tracing::debug!(
            "slash command received from {} ({}): {}",
            command.username,
            command.user_id,
            command.text
        );
        command
    }

    /// Decode a raw url-encoded form body and wrap it.
    pub fn from_form(body: &str, token: impl Into<String>) -> Result<Self> {
        let payload: SlashCommandPayload = serde_urlencoded::from_str(body)
            .map_err(|err| SynoChatError::MalformedPayload(err.to_string()))?;
        Ok(Self::new(payload, token))
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The full command text, including the leading command word.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Declare a required parameter and parse it from the command text.
    ///
    /// Positional parameters take the whitespace-separated token at their
    /// declaration index, counting from just after the command word. A
    /// missing token is a hard error and the parameter is not recorded.
    pub fn add_positional_parameter(&mut self, name: &str) -> Result<Parameter> {
        self.add_positional_parameter_with(name, AcceptedValues::Any)
    }

    /// Declare a required parameter constrained to a set of values. The
    /// value is still consumed positionally; `valid` reports whether it is
    /// in the set.
    pub fn add_positional_parameter_with(
        &mut self,
        name: &str,
        accepted: impl Into<AcceptedValues>,
    ) -> Result<Parameter> {
        self.parse_positional(Parameter::new(name, false, accepted.into()))
    }

    /// Declare an optional parameter and parse it from the command text.
    ///
    /// Optional parameters are located by name anywhere after the command
    /// word, as a bare flag (`force`) or with a value (`delay=5`). Absence
    /// is state, not an error, so this cannot fail.
    ///
    /// An optional parameter still occupies a declaration slot: a
    /// positional parameter declared after it takes the token at the later
    /// index whether or not the optional one matched anything.
    pub fn add_optional_parameter(&mut self, name: &str) -> Parameter {
        self.add_optional_parameter_with(name, AcceptedValues::Any)
    }

    /// Declare an optional parameter constrained to a set of values.
    pub fn add_optional_parameter_with(
        &mut self,
        name: &str,
        accepted: impl Into<AcceptedValues>,
    ) -> Parameter {
        self.parse_optional(Parameter::new(name, true, accepted.into()))
    }

    fn parse_positional(&mut self, mut parameter: Parameter) -> Result<Parameter> {
        let index = self.parameters.len();
        let token = self
            .text
            .split_whitespace()
            .skip(1)
            .nth(index)
            .map(str::to_owned);
        match token {
            Some(value) => {
                parameter.value = Some(value);
                parameter.detected = true;
                Ok(self.record(parameter))
            }
            None => {
                tracing::warn!(
                    "required parameter `{}` not found in command text",
                    parameter.name
                );
                Err(SynoChatError::MissingParameter(parameter.name))
            }
        }
    }

    fn parse_optional(&mut self, mut parameter: Parameter) -> Parameter {
        for token in self.text.split_whitespace().skip(1) {
            if parameter.claims(token) {
                parameter.detected = true;
                parameter.value = split_value(token);
                break;
            }
        }
        self.record(parameter)
    }

    fn record(&mut self, mut parameter: Parameter) -> Parameter {
        parameter.valid = match parameter.value.as_deref() {
            Some(value) => parameter.accepted.matches(value),
            None => matches!(parameter.accepted, AcceptedValues::Any),
        };
        tracing::debug!(
            name = %parameter.name,
            value = ?parameter.value,
            detected = parameter.detected,
            valid = parameter.valid,
            "parameter parsed"
        );
        self.parameters.push(parameter.clone());
        parameter
    }

    /// Look up a previously declared parameter by name.
    pub fn get_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|parameter| parameter.name == name)
    }

    /// All parameters declared so far, in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Compare the locally configured token against the one the chat
    /// server sent. Exact, case-sensitive string equality.
    pub fn authenticate(&self) -> Result<()> {
        if self.client_token != self.server_token {
            tracing::warn!("slash command rejected: token mismatch");
            return Err(SynoChatError::InvalidToken);
        }
        Ok(())
    }

    /// Like [`authenticate`](SlashCommand::authenticate), as a plain bool.
    pub fn is_authentic(&self) -> bool {
        self.client_token == self.server_token
    }

    /// Build the JSON reply for this command, echoing the caller identity
    /// back to the chat server. Authenticates first.
    pub fn create_response(&self, text: &str, file_url: Option<&str>) -> Result<CommandResponse> {
        self.authenticate()?;
        Ok(CommandResponse {
            token: self.client_token.clone(),
            text: text.to_owned(),
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            file_url: file_url.map(str::to_owned),
        })
    }

    /// The body and HTTP status to answer with when authentication fails.
    pub fn invalid_token_response(&self) -> (String, u16) {
        (serde_json::json!({"success": false}).to_string(), 403)
    }
}
