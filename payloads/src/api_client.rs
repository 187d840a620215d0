use crate::{PostId, UserId, requests, responses};
use jiff::Timestamp;
use reqwest::StatusCode;
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
#[derive(Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn empty_post(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("health_check").await?;
        ok_empty(response).await
    }

    pub async fn create_account(
        &self,
        details: &requests::CreateAccount,
    ) -> Result<(), ClientError> {
        let response = self.post("create_account", details).await?;
        ok_empty(response).await
    }

    pub async fn login(
        &self,
        details: &requests::LoginCredentials,
    ) -> Result<(), ClientError> {
        let response = self.post("login", &details).await?;
        ok_empty(response).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.empty_post("logout").await?;
        ok_empty(response).await
    }

    /// Check if the user is logged in.
    pub async fn login_check(&self) -> Result<bool, ClientError> {
        let response = self.empty_post("login_check").await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::UNAUTHORIZED => Ok(false),
            _ => Err(ClientError::APIError(
                response.status(),
                response.text().await?,
            )),
        }
    }

    /// Get the current user's profile information.
    pub async fn user_profile(
        &self,
    ) -> Result<responses::UserProfile, ClientError> {
        let response = self.empty_get("user_profile").await?;
        ok_body(response).await
    }

    /// Set the current user's username and gobi.
    pub async fn update_profile(
        &self,
        details: &requests::UpdateProfile,
    ) -> Result<responses::UserProfile, ClientError> {
        let response = self.post("update_profile", details).await?;
        ok_body(response).await
    }

    /// Replace the current user's avatar. Only PNG and JPEG are accepted.
    pub async fn upload_avatar(
        &self,
        details: &requests::UploadAvatar,
    ) -> Result<responses::UserProfile, ClientError> {
        let response = self.post("upload_avatar", details).await?;
        ok_body(response).await
    }

    pub async fn delete_avatar(
        &self,
    ) -> Result<responses::UserProfile, ClientError> {
        let response = self.empty_post("delete_avatar").await?;
        ok_body(response).await
    }

    /// Returns the URL for fetching a user's raw avatar bytes.
    ///
    /// The update time is appended so browsers refetch after a change.
    /// Use this for `<img src>` attributes in the UI.
    pub fn avatar_url(&self, user_id: &UserId, updated_at: &Timestamp) -> String {
        format!(
            "{}/api/avatars/{}?t={}",
            self.address,
            user_id,
            updated_at.as_millisecond()
        )
    }

    /// Fetches raw avatar bytes. Primarily for tests.
    pub async fn get_avatar(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<u8>, ClientError> {
        let response = self.empty_get(&format!("avatars/{user_id}")).await?;
        if !response.status().is_success() {
            return Err(ClientError::APIError(
                response.status(),
                response.text().await?,
            ));
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Delete the current user's account after re-checking their password.
    pub async fn delete_account(
        &self,
        details: &requests::DeleteAccount,
    ) -> Result<(), ClientError> {
        let response = self.post("delete_account", details).await?;
        ok_empty(response).await
    }

    pub async fn public_profile(
        &self,
        user_id: &UserId,
    ) -> Result<responses::PublicProfile, ClientError> {
        let response = self.post("public_profile", user_id).await?;
        ok_body(response).await
    }

    /// Liked posts and followed users for the current user.
    pub async fn viewer_context(
        &self,
    ) -> Result<responses::ViewerContext, ClientError> {
        let response = self.empty_get("viewer_context").await?;
        ok_body(response).await
    }

    pub async fn create_post(
        &self,
        details: &requests::CreatePost,
    ) -> Result<responses::Post, ClientError> {
        let response = self.post("create_post", details).await?;
        ok_body(response).await
    }

    pub async fn delete_post(&self, post_id: &PostId) -> Result<(), ClientError> {
        let response = self.post("delete_post", post_id).await?;
        ok_empty(response).await
    }

    pub async fn like_post(&self, post_id: &PostId) -> Result<(), ClientError> {
        let response = self.post("like_post", post_id).await?;
        ok_empty(response).await
    }

    pub async fn unlike_post(&self, post_id: &PostId) -> Result<(), ClientError> {
        let response = self.post("unlike_post", post_id).await?;
        ok_empty(response).await
    }

    pub async fn follow_user(&self, user_id: &UserId) -> Result<(), ClientError> {
        let response = self.post("follow_user", user_id).await?;
        ok_empty(response).await
    }

    pub async fn unfollow_user(
        &self,
        user_id: &UserId,
    ) -> Result<(), ClientError> {
        let response = self.post("unfollow_user", user_id).await?;
        ok_empty(response).await
    }

    /// A page of the home timeline, newest first.
    pub async fn timeline(
        &self,
        details: &requests::Timeline,
    ) -> Result<Vec<responses::Post>, ClientError> {
        let response = self.post("timeline", details).await?;
        ok_body(response).await
    }

    /// A page of one user's posts, newest first.
    pub async fn user_posts(
        &self,
        details: &requests::UserPosts,
    ) -> Result<Vec<responses::Post>, ClientError> {
        let response = self.post("user_posts", details).await?;
        ok_body(response).await
    }

    /// A page of the posts a user has liked, most recently liked first.
    pub async fn liked_posts(
        &self,
        details: &requests::LikedPosts,
    ) -> Result<Vec<responses::Post>, ClientError> {
        let response = self.post("liked_posts", details).await?;
        ok_body(response).await
    }

    pub async fn search_posts(
        &self,
        details: &requests::SearchPosts,
    ) -> Result<Vec<responses::Post>, ClientError> {
        let response = self.post("search_posts", details).await?;
        ok_body(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}
