//! Authentication
//!
//! Every request past [`middleware::handler`] carries a [`Principal`] in the
//! depot. Back-office routes additionally pass through [`admin::handler`].
//!
//! [`Principal`]: storefront_app::auth::Principal

pub(crate) mod admin;
pub(crate) mod middleware;
