mod callback_redirect;
mod error;
mod extractors;
