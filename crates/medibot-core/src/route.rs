//! Screens the session can land on.

use strum::Display;

/// Where the front end should go after a session lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Route {
    /// Nobody is signed in.
    SignIn,
    /// The consultation screen for the signed-in identity.
    Consultation,
}
