//! Typed commands for platform operations
//!
//! One thin wrapper per backend operation: build the path and payload,
//! delegate to [`ApiClient`], decode the typed response. Validation and
//! business rules stay on the backend; nothing here inspects the data it
//! ships.

use std::sync::Arc;

use hireloop_common::auth::SessionUser;
use hireloop_domain::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use hireloop_domain::{
    AssistRequest, AssistResponse, BlogPatch, BlogPost, JobApplication, JobPatch, JobPosting,
    JobQuery, NewApplication, NewBlogPost, NewJobPosting, Page, Profile, ProfileUpdate,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use urlencoding::encode;
use uuid::Uuid;

use super::client::ApiClient;
use super::errors::ApiError;

/// Credentials for the email/password sign-in flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Typed operations on the platform API
///
/// Holds nothing but the client; safe to clone the `Arc` and use from many
/// tasks at once. Concurrent calls that hit an expired session coalesce on
/// the client's single refresh.
pub struct ApiCommands {
    client: Arc<ApiClient>,
}

impl ApiCommands {
    /// Create a new commands instance
    ///
    /// # Arguments
    ///
    /// * `client` - API client
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    // === Session Operations ===

    /// Sign in with email and password
    ///
    /// The session cookie arrives via `Set-Cookie` and lands in the shared
    /// jar; the returned identity is for the caller to record with its
    /// session manager.
    ///
    /// # Errors
    ///
    /// Returns error if the credentials are rejected or the request fails
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<SessionUser, ApiError> {
        let user: SessionUser = self.client.post("/auth/login", credentials).await?;
        info!(user_id = %user.id, "signed in");
        Ok(user)
    }

    /// Sign out, invalidating the backend session
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.post_empty::<()>("/auth/logout").await?;
        info!("signed out");
        Ok(())
    }

    /// Identity of the signed-in account
    ///
    /// # Errors
    ///
    /// Returns error if no session is active or the request fails
    #[instrument(skip(self))]
    pub async fn current_account(&self) -> Result<SessionUser, ApiError> {
        self.client.get("/auth/me").await
    }

    // === Job Operations ===

    /// List postings matching `query`
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self, query))]
    pub async fn list_jobs(&self, query: &JobQuery) -> Result<Page<JobPosting>, ApiError> {
        let page: Page<JobPosting> = self.client.get_query("/jobs", query).await?;
        debug!(count = page.items.len(), "jobs listed");
        Ok(page)
    }

    /// Get a posting by id
    ///
    /// # Errors
    ///
    /// Returns error if the posting does not exist or the request fails
    #[instrument(skip(self), fields(job_id = %id))]
    pub async fn get_job(&self, id: Uuid) -> Result<JobPosting, ApiError> {
        self.client.get(&format!("/jobs/{id}")).await
    }

    /// Create a posting
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self, job))]
    pub async fn create_job(&self, job: &NewJobPosting) -> Result<JobPosting, ApiError> {
        let created: JobPosting = self.client.post("/jobs", job).await?;
        debug!(job_id = %created.id, "job posting created");
        Ok(created)
    }

    /// Apply a partial update to a posting
    ///
    /// # Errors
    ///
    /// Returns error if the posting does not exist or the request fails
    #[instrument(skip(self, patch), fields(job_id = %id))]
    pub async fn update_job(&self, id: Uuid, patch: &JobPatch) -> Result<JobPosting, ApiError> {
        self.client.patch(&format!("/jobs/{id}"), patch).await
    }

    /// Close a posting to further applications
    ///
    /// # Errors
    ///
    /// Returns error if the posting does not exist or the request fails
    #[instrument(skip(self), fields(job_id = %id))]
    pub async fn close_job(&self, id: Uuid) -> Result<JobPosting, ApiError> {
        let closed: JobPosting = self.client.post_empty(&format!("/jobs/{id}/close")).await?;
        debug!(job_id = %closed.id, "job posting closed");
        Ok(closed)
    }

    // === Application Operations ===

    /// Submit an application to a posting
    ///
    /// # Errors
    ///
    /// Returns error if the posting is closed or the request fails
    #[instrument(skip(self, application), fields(job_id = %job_id))]
    pub async fn submit_application(
        &self,
        job_id: Uuid,
        application: &NewApplication,
    ) -> Result<JobApplication, ApiError> {
        let submitted: JobApplication =
            self.client.post(&format!("/jobs/{job_id}/applications"), application).await?;
        debug!(application_id = %submitted.id, "application submitted");
        Ok(submitted)
    }

    /// List applications received by a posting
    ///
    /// # Errors
    ///
    /// Returns error if the posting does not exist or the request fails
    #[instrument(skip(self), fields(job_id = %job_id))]
    pub async fn list_applications(&self, job_id: Uuid) -> Result<Page<JobApplication>, ApiError> {
        self.client.get(&format!("/jobs/{job_id}/applications")).await
    }

    // === Blog Operations ===

    /// List published posts, newest first
    ///
    /// `per_page` defaults to [`DEFAULT_PAGE_SIZE`] and is capped at
    /// [`MAX_PAGE_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        page: u32,
        per_page: Option<u32>,
    ) -> Result<Page<BlogPost>, ApiError> {
        let per_page = per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
        let path = format!("/blog/posts?page={page}&per_page={per_page}");
        self.client.get(&path).await
    }

    /// Get a post by slug
    ///
    /// # Errors
    ///
    /// Returns error if the post does not exist or the request fails
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_post(&self, slug: &str) -> Result<BlogPost, ApiError> {
        let path = format!("/blog/posts/{}", encode(slug));
        self.client.get(&path).await
    }

    /// Create a post
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self, post))]
    pub async fn create_post(&self, post: &NewBlogPost) -> Result<BlogPost, ApiError> {
        let created: BlogPost = self.client.post("/blog/posts", post).await?;
        debug!(post_id = %created.id, slug = %created.slug, "blog post created");
        Ok(created)
    }

    /// Apply a partial update to a post
    ///
    /// # Errors
    ///
    /// Returns error if the post does not exist or the request fails
    #[instrument(skip(self, patch), fields(post_id = %id))]
    pub async fn update_post(&self, id: Uuid, patch: &BlogPatch) -> Result<BlogPost, ApiError> {
        self.client.patch(&format!("/blog/posts/{id}"), patch).await
    }

    /// Delete a post
    ///
    /// # Errors
    ///
    /// Returns error if the post does not exist or the request fails
    #[instrument(skip(self), fields(post_id = %id))]
    pub async fn delete_post(&self, id: Uuid) -> Result<(), ApiError> {
        self.client.delete::<()>(&format!("/blog/posts/{id}")).await?;
        debug!(post_id = %id, "blog post deleted");
        Ok(())
    }

    // === Profile Operations ===

    /// Get the public profile of an account
    ///
    /// # Errors
    ///
    /// Returns error if the profile does not exist or the request fails
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Profile, ApiError> {
        self.client.get(&format!("/profiles/{user_id}")).await
    }

    /// Apply a partial update to a profile
    ///
    /// # Errors
    ///
    /// Returns error if the profile does not exist or the request fails
    #[instrument(skip(self, update), fields(user_id = %user_id))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Profile, ApiError> {
        self.client.patch(&format!("/profiles/{user_id}"), update).await
    }

    // === Assist Operations ===

    /// Ask the backend to generate content for the given request
    ///
    /// Generation is entirely backend-side; this ships the prompt and hands
    /// back whatever the model produced.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self, request), fields(kind = ?request.kind))]
    pub async fn generate(&self, request: &AssistRequest) -> Result<AssistResponse, ApiError> {
        let response: AssistResponse = self.client.post("/assist/generate", request).await?;
        debug!(kind = ?response.kind, chars = response.content.len(), "assist content generated");
        Ok(response)
    }
}
