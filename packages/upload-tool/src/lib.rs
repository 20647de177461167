//! Library for `upload-tool`, which publishes article series to Qiita through
//! the companion Node tool in `post/qiita`.

pub mod layout;
pub mod prompt;
pub mod runner;
pub mod series;
pub mod summary;
pub mod token;
