//! Judge subdomain: turning the judge model's reply into a verdict.

pub mod parsing;

pub use parsing::parse_judge_response;
