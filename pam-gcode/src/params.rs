//! Parsing and validation of G-code command parameters.
//!
//! Command arguments follow the `KEY=VALUE` convention:
//! `MESH_CONFIG X0=50 Y0=50 X1=150 Y1=150`. Keys are matched
//! ASCII-case-insensitively; values are parsed on access, so a handler only
//! validates the parameters it asks for.

use heapless::Vec;

/// Maximum number of `KEY=VALUE` pairs in one command
pub const MAX_ARGS: usize = 8;

/// Errors surfaced by parameter access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamError {
    /// Required parameter absent and no default given
    Missing(&'static str),
    /// Value present but not parseable as the requested type
    Invalid(&'static str),
    /// Value below the allowed minimum
    BelowMinimum(&'static str),
    /// Value above the allowed maximum
    AboveMaximum(&'static str),
    /// Command carries more than [`MAX_ARGS`] arguments
    TooManyArgs,
}

impl core::fmt::Display for ParamError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParamError::Missing(name) => write!(f, "missing parameter {}", name),
            ParamError::Invalid(name) => write!(f, "unable to parse parameter {}", name),
            ParamError::BelowMinimum(name) => {
                write!(f, "parameter {} below allowed minimum", name)
            }
            ParamError::AboveMaximum(name) => {
                write!(f, "parameter {} above allowed maximum", name)
            }
            ParamError::TooManyArgs => write!(f, "too many command arguments"),
        }
    }
}

/// Parsed argument list for a single command invocation
///
/// Borrows from the command line; the host keeps the line alive for the
/// duration of the handler call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandArgs<'a> {
    args: Vec<(&'a str, &'a str), MAX_ARGS>,
}

impl<'a> CommandArgs<'a> {
    /// Parse the argument portion of a command line (everything after the
    /// command name)
    ///
    /// Empty input yields an empty argument list. A bare word without `=`
    /// is kept with an empty value so `contains` still sees it.
    pub fn parse(input: &'a str) -> Result<Self, ParamError> {
        let mut args = Vec::new();
        for word in input.split_ascii_whitespace() {
            let (name, value) = match word.split_once('=') {
                Some(pair) => pair,
                None => (word, ""),
            };
            args.push((name, value)).map_err(|_| ParamError::TooManyArgs)?;
        }
        Ok(Self { args })
    }

    /// Split a full command line into the command name and its arguments
    pub fn split_line(line: &'a str) -> Result<(&'a str, Self), ParamError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(|c: char| c.is_ascii_whitespace()) {
            Some((name, rest)) => (name, rest),
            None => (line, ""),
        };
        Ok((name, Self::parse(rest)?))
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether the command carried no arguments
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Whether a parameter is present at all
    pub fn contains(&self, name: &str) -> bool {
        self.raw(name).is_some()
    }

    /// Raw textual value of a parameter, if present
    pub fn raw(&self, name: &str) -> Option<&'a str> {
        self.args
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }

    /// Float accessor with optional default and bounds
    ///
    /// A missing parameter falls back to `default`, or fails when no
    /// default is given. Bounds are inclusive; a violation rejects the
    /// command without touching any state.
    pub fn get_float(
        &self,
        name: &'static str,
        default: Option<f32>,
        minval: Option<f32>,
        maxval: Option<f32>,
    ) -> Result<f32, ParamError> {
        let raw = match self.raw(name) {
            Some(value) => value,
            None => return default.ok_or(ParamError::Missing(name)),
        };
        let value: f32 = raw.parse().map_err(|_| ParamError::Invalid(name))?;
        if !value.is_finite() {
            return Err(ParamError::Invalid(name));
        }
        if let Some(min) = minval {
            if value < min {
                return Err(ParamError::BelowMinimum(name));
            }
        }
        if let Some(max) = maxval {
            if value > max {
                return Err(ParamError::AboveMaximum(name));
            }
        }
        Ok(value)
    }
}
