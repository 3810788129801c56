pub mod cfn;
pub mod error;
pub mod event;
pub mod icon;
pub mod slack;
pub mod status;
