//! Contact form delivery.
//!
//! - `payload`: form fields, submission metadata and the webhook wire format
//! - `client`: the webhook client (`ContactClient::submit`)
//! - `fallback`: fire-and-forget transport used when the request cannot complete
//! - `form`: form state, validation and the submit flow
//! - `links`: `mailto:` / `tel:` links for the contact-info block

mod client;
mod fallback;
mod form;
mod links;
mod payload;

pub use client::{ContactClient, SubmissionError};
pub use fallback::{FallbackDispatcher, SpawnedDispatcher};
pub use form::{ContactForm, FormError, FormStatus};
pub use links::{mailto_href, tel_href};
pub use payload::{
    ClientEnvironment, ContactFormPayload, EnrichedPayload, ResponseBody, SubmissionMetadata,
    SubmissionResult,
};
