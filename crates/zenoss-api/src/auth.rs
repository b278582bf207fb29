// Cookie-based login
//
// Zenoss authenticates through the PluggableAuthService cookie helper: a
// form POST sets the `__ac` session cookie in the client's jar, and every
// later router call carries it automatically.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::client::ZenossClient;
use crate::error::{Error, RequestFailure};

const LOGIN_PATH: &str = "/zport/acl_users/cookieAuthHelper/login";
const LOGIN_FORM_MARKER: &str = "login_form";
const DMD_PATH: &str = "/zport/dmd";

impl ZenossClient {
    /// Post the login form.
    ///
    /// With `verify` set, a non-2xx answer or a redirect back to the login
    /// form fails with [`Error::Authentication`]. Without it, only transport
    /// failures are reported and a bad password goes unnoticed until the
    /// first router call.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
        verify: bool,
    ) -> Result<(), Error> {
        let url = self.url(LOGIN_PATH)?;
        let came_from = self.url(DMD_PATH)?;

        debug!(username, "logging in at {url}");

        let form = [
            ("__ac_name", username),
            ("__ac_password", password.expose_secret()),
            ("submitted", "true"),
            ("came_from", came_from.as_str()),
        ];

        let resp = self
            .http()
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(RequestFailure::Transport)?;

        if !verify {
            debug!(status = %resp.status(), "login response not verified");
            return Ok(());
        }

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
            });
        }

        if resp.url().path().contains(LOGIN_FORM_MARKER) {
            warn!(final_url = %resp.url(), "login bounced back to the login form");
            return Err(Error::Authentication {
                message: format!("login rejected for user '{username}'"),
            });
        }

        debug!("login successful");
        Ok(())
    }
}
