//! Conversions from external infrastructure errors into domain errors.

use meetgrid_domain::MeetgridError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MeetgridError);

impl From<InfraError> for MeetgridError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MeetgridError> for InfraError {
    fn from(value: MeetgridError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoMeetgridError {
    fn into_meetgrid(self) -> MeetgridError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → MeetgridError */
/* -------------------------------------------------------------------------- */

impl IntoMeetgridError for std::io::Error {
    fn into_meetgrid(self) -> MeetgridError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::NotFound => MeetgridError::Config(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => {
                MeetgridError::Config(format!("permission denied: {self}"))
            }
            ErrorKind::InvalidData => MeetgridError::Config(format!("file is not UTF-8: {self}")),
            _ => MeetgridError::Config(format!("failed to read file: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        Self(value.into_meetgrid())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → MeetgridError */
/* -------------------------------------------------------------------------- */

impl IntoMeetgridError for toml::de::Error {
    fn into_meetgrid(self) -> MeetgridError {
        MeetgridError::Config(format!("Invalid TOML format: {}", self.message()))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        Self(value.into_meetgrid())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → MeetgridError */
/* -------------------------------------------------------------------------- */

impl IntoMeetgridError for serde_json::Error {
    fn into_meetgrid(self) -> MeetgridError {
        MeetgridError::Config(format!(
            "Invalid JSON format at line {} column {}: {self}",
            self.line(),
            self.column()
        ))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        Self(value.into_meetgrid())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
