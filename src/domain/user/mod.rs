//! User module - registered users and what they leave behind.
//!
//! A `UserProfile` is keyed by normalized e-mail and owns an append-only
//! interaction history. Feedback and ratings are separate records tagged
//! with the user id.

pub mod feedback;
pub mod profile;

pub use feedback::{Feedback, RatingRecord};
pub use profile::{Demographics, Interaction, UserProfile, ADULT_AGE, MAX_AGE};
