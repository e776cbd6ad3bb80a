//! API operations.
//!
//! Each method maps to one route (two for the download helpers) and goes
//! through [`PCloudClient::call`].

use tracing::{debug, info, instrument};
use url::Url;

use pcloud_core::routes::{
    DELETE_TOKEN, GET_DIGEST, GET_FILE_LINK, INVITE, LIST_FOLDER, LIST_TOKENS, LOGOUT, SEARCH,
    STAT, UPLOAD_FILE, USER_INFO, USER_INVITES,
};
use pcloud_core::{
    AuthToken, Error, FileLink, FolderListing, LoginCredentials, Metadata, Params, Payload, Result,
};

use crate::client::PCloudClient;
use crate::request::{ApiRequest, Upload};

impl PCloudClient {
    // ========================================================================
    // Authentication
    // ========================================================================

    /// Fetch a digest for digest-based login. Needs no token.
    #[instrument(skip(self))]
    pub async fn get_digest(&self) -> Result<Vec<u8>> {
        let payload = self
            .call(ApiRequest::get(GET_DIGEST).unauthenticated())
            .await?;
        Ok(payload.str_field(GET_DIGEST, "digest")?.as_bytes().to_vec())
    }

    /// Account information for the current token.
    pub async fn userinfo(&self, params: Params) -> Result<Payload> {
        self.call(ApiRequest::get(USER_INFO).params(params)).await
    }

    /// Exchange a username and password for a fresh auth token.
    ///
    /// The client's own token is left untouched; see [`PCloudClient::login`].
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn get_token(&self, credentials: &LoginCredentials) -> Result<AuthToken> {
        let request = ApiRequest::get(USER_INFO)
            .unauthenticated()
            .param("getauth", 1)
            .param("username", credentials.username())
            .param("password", credentials.password());

        let payload = self.call(request).await?;
        let token = payload.str_field(USER_INFO, "auth")?;
        debug!("Obtained auth token");
        Ok(AuthToken::new(token))
    }

    /// Obtain a token and use it for every following request.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken> {
        let token = self.get_token(credentials).await?;
        self.set_token(token.clone()).await;
        info!("Logged in");
        Ok(token)
    }

    /// Invalidate the current token on the server.
    pub async fn logout(&self) -> Result<Payload> {
        self.call(ApiRequest::get(LOGOUT)).await
    }

    /// List the account's active tokens.
    pub async fn listtokens(&self) -> Result<Payload> {
        self.call(ApiRequest::get(LIST_TOKENS)).await
    }

    /// Revoke a token by id.
    pub async fn deletetoken(&self, tokenid: u64) -> Result<Payload> {
        self.call(ApiRequest::get(DELETE_TOKEN).param("tokenid", tokenid))
            .await
    }

    // ========================================================================
    // Folders and files
    // ========================================================================

    /// List a folder. Requires `path` or `folderid`.
    pub async fn listfolder(&self, params: Params) -> Result<Payload> {
        self.call(ApiRequest::get(LIST_FOLDER).params(params)).await
    }

    /// List a folder and decode its metadata.
    pub async fn listfolder_metadata(&self, params: Params) -> Result<Metadata> {
        let listing: FolderListing = self.listfolder(params).await?.decode(LIST_FOLDER)?;
        Ok(listing.metadata)
    }

    /// File or folder metadata.
    pub async fn stat(&self, params: Params) -> Result<Payload> {
        self.call(ApiRequest::get(STAT).params(params)).await
    }

    /// Search the account for `query`.
    pub async fn search(&self, query: &str, params: Params) -> Result<Payload> {
        let params = Params::new().with("query", query).merged(params);
        self.call(ApiRequest::get(SEARCH).params(params)).await
    }

    // ========================================================================
    // Links and downloads
    // ========================================================================

    /// Resolve a download link. Requires `path` or `fileid`.
    ///
    /// The link is always absolute, on the first host returned, with the
    /// API base URL's scheme.
    #[instrument(skip(self, params))]
    pub async fn getfilelink(&self, params: Params) -> Result<Url> {
        let link: FileLink = self
            .call(ApiRequest::get(GET_FILE_LINK).params(params))
            .await?
            .decode(GET_FILE_LINK)?;
        link.url(self.base_url().scheme())
    }

    /// Every download location for a file.
    pub async fn get_all_links(&self, fileid: u64) -> Result<FileLink> {
        self.call(ApiRequest::get(GET_FILE_LINK).param("fileid", fileid))
            .await?
            .decode(GET_FILE_LINK)
    }

    /// Download link for the file called `name` inside `folder`.
    ///
    /// Returns `Ok(None)` if the folder has no such file.
    #[instrument(skip(self))]
    pub async fn get_file(&self, name: &str, folder: &str) -> Result<Option<Url>> {
        let metadata = self
            .listfolder_metadata(Params::new().with("path", folder))
            .await?;

        let Some(fileid) = metadata.child(name).and_then(|entry| entry.fileid) else {
            debug!("File not present in folder");
            return Ok(None);
        };

        self.getfilelink(Params::new().with("fileid", fileid))
            .await
            .map(Some)
    }

    /// Resolve a download link and fetch the file's bytes.
    pub async fn download_file(&self, params: Params) -> Result<Vec<u8>> {
        let url = self.getfilelink(params).await?;
        self.fetch_raw(&url).await
    }

    // ========================================================================
    // Uploads
    // ========================================================================

    /// Upload one or more files. Requires `path` or `folderid`.
    #[instrument(skip(self, upload, params), fields(files = upload.len()))]
    pub async fn uploadfile(&self, upload: Upload, params: Params) -> Result<Payload> {
        if upload.is_empty() {
            self.require_token().await?;
            self.connection()?;
            return Err(Error::MissingRequiredParameter {
                route: UPLOAD_FILE.to_string(),
                alternatives: vec!["files".to_string(), "data".to_string()],
            });
        }

        self.call(ApiRequest::post(UPLOAD_FILE).params(params).upload(upload))
            .await
    }

    /// Upload a single file. Requires `path` or `folderid`.
    pub async fn upload_one_file(
        &self,
        filename: &str,
        content: impl Into<Vec<u8>>,
        params: Params,
    ) -> Result<Payload> {
        self.uploadfile(Upload::single(filename, content), params)
            .await
    }

    // ========================================================================
    // Sharing
    // ========================================================================

    /// Invite people to pCloud.
    pub async fn invite(&self, params: Params) -> Result<Payload> {
        self.call(ApiRequest::get(INVITE).params(params)).await
    }

    /// List invitations sent by the account.
    pub async fn userinvites(&self, params: Params) -> Result<Payload> {
        self.call(ApiRequest::get(USER_INVITES).params(params)).await
    }
}
