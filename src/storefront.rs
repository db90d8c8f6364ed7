use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::actions::{
    LoginAction, LogoutAction, RegisterAction, RestoreSessionAction, UploadImagesAction,
};
use crate::api::{
    ApiClient, FilePart, HeadlessNavigator, Navigator, RegisterRequest, ReqwestTransport,
    Transport, UploadedFile, UserProfile,
};
use crate::{ClientConfig, ClientError, SessionStore, TokenStore};

/// The client: one session store and the API client bound to it.
///
/// Construct it once and pass it by reference. Cloning an `ApiClient` out of
/// it shares the same session.
pub struct Storefront {
    session: Arc<SessionStore>,
    api: ApiClient,
    initialized: OnceCell<()>,
}

impl Storefront {
    /// Builds a client that talks HTTP through `reqwest` and has no page
    /// model.
    ///
    /// # Errors
    ///
    /// [`ClientError::Configuration`] if `config` fails validation.
    pub fn new(config: ClientConfig, store: impl TokenStore + 'static) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Self::with_parts(
            config,
            Arc::new(store),
            Arc::new(transport),
            Arc::new(HeadlessNavigator::new()),
        )
    }

    /// Builds a client from explicit collaborators.
    pub fn with_parts(
        config: ClientConfig,
        store: Arc<dyn TokenStore>,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        config.validate()?;

        let session = Arc::new(SessionStore::with_shared_store(
            store,
            config.token_key.clone(),
        ));
        let api = ApiClient::new(config, transport, session.clone(), navigator);

        Ok(Self {
            session,
            api,
            initialized: OnceCell::new(),
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Restores the persisted session. Only the first call does any work.
    ///
    /// Returns the current user, if any.
    pub async fn init(&self) -> Option<UserProfile> {
        self.initialized
            .get_or_init(|| async {
                RestoreSessionAction::new(self.api.clone()).execute().await;
            })
            .await;

        self.session.current_user()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.initialized()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ClientError> {
        LoginAction::new(self.api.clone())
            .execute(email, password)
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, ClientError> {
        RegisterAction::new(self.api.clone()).execute(request).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        LogoutAction::new(&self.session).execute().await
    }

    pub async fn upload_images(
        &self,
        files: Vec<FilePart>,
    ) -> Result<Vec<UploadedFile>, ClientError> {
        UploadImagesAction::new(self.api.clone()).execute(files).await
    }

    pub fn file_url(&self, filename: &str) -> String {
        self.api.file_url(filename)
    }
}
