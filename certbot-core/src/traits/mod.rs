//! Seams between the run logic and the outside world

mod certificate_issuer;
mod challenge_provider;
mod clock;

pub use certificate_issuer::CertificateIssuer;
pub use challenge_provider::ChallengeProvider;
pub use clock::{Clock, SystemClock};
