// Job listings: the filter/sort engine plus the collaborators that feed it
// (where postings come from) and consume it (where applications go).

pub mod engine;
pub mod handlers;
pub mod query;
pub mod source;
pub mod submitter;
pub mod view;
pub mod wage;
