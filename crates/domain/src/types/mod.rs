//! Domain types and models
//!
//! Request/response shapes exchanged with the HireLoop backend. These are
//! plain data carriers; the backend owns validation and business rules.

pub mod assist;
pub mod blog;
pub mod job;
pub mod page;
pub mod profile;

// Re-export the full type surface for convenience
pub use assist::{AssistKind, AssistRequest, AssistResponse};
pub use blog::{BlogPatch, BlogPost, NewBlogPost};
pub use job::{
    ApplicationStatus, EmploymentType, JobApplication, JobPatch, JobPosting, JobQuery, JobStatus,
    NewApplication, NewJobPosting,
};
pub use page::Page;
pub use profile::{Profile, ProfileUpdate};
