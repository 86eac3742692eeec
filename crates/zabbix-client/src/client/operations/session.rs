//! Session operations
//!
//! Login and the version probe are the only calls sent without a token.

use tracing::info;
use zabbix_http::Transport;
use zabbix_protocol::Params;

use crate::client::core::{Auth, Client};
use crate::error::Result;

/// Authentication method name
pub const LOGIN_METHOD: &str = "user.authenticate";

/// API version probe method name
pub const VERSION_METHOD: &str = "apiinfo.version";

impl<T: Transport + 'static> Client<T> {
    /// Authenticate and store the returned session token.
    ///
    /// Every later call on this client (and its clones) carries the token.
    /// On failure the previously stored token, if any, is kept.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use zabbix_client::Client;
    /// # async fn example() -> zabbix_client::Result<()> {
    /// let client = Client::from_url("https://zabbix.example.com/api_jsonrpc.php")?;
    /// let token = client.login("Admin", "zabbix").await?;
    /// assert_eq!(client.auth(), Some(token));
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Remote`] for rejected credentials,
    /// [`crate::Error::Decode`] if the result is not a string token, or
    /// [`crate::Error::Transport`].
    pub async fn login(&self, user: &str, password: &str) -> Result<String> {
        let params = Params::new().with("user", user).with("password", password);
        let token: String = self
            .call_into_with(LOGIN_METHOD, params.into(), Auth::Anonymous)
            .await?;

        self.set_auth(token.clone());
        info!(user, "Authenticated with Zabbix API");
        Ok(token)
    }

    /// Query the server's API version. Needs no session.
    ///
    /// # Errors
    ///
    /// Same as [`Client::call_into`].
    pub async fn version(&self) -> Result<String> {
        self.call_into_with(VERSION_METHOD, Params::new().into(), Auth::Anonymous)
            .await
    }
}
