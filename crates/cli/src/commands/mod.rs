pub mod dashboard;
pub mod export;
pub mod feed;
pub mod issues;
pub mod resolve;
pub mod submit;

pub use dashboard::DashboardCommand;
pub use export::ExportCommand;
pub use feed::FeedCommand;
pub use issues::IssuesCommand;
pub use resolve::ResolveCommand;
pub use submit::SubmitCommand;
