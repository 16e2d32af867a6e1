// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget construction errors.

use std::error::Error;
use std::fmt;

/// A widget was configured in a way it cannot work with.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum WidgetError {
    /// Neither initial parameters nor a parameter source were given.
    NoParameters {
        /// The kind of widget being built.
        widget: &'static str,
    },
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoParameters { widget } => {
                write!(f, "{widget} needs parameters or a parameter source")
            }
        }
    }
}

impl Error for WidgetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_widget() {
        let err = WidgetError::NoParameters { widget: "button" };
        assert_eq!(err.to_string(), "button needs parameters or a parameter source");
    }
}
