//! Share links
//!
//! A share link opens the public detail view of an apartment in the
//! frontend. Views render it as a QR code or copy it to the clipboard.

use stayfolio_auth::Route;
use stayfolio_types::ApartmentId;

use crate::ClientConfig;

/// Public detail URL: `<frontend_base_url>/apartments/<id>`
pub fn share_url(config: &ClientConfig, id: &ApartmentId) -> String {
    format!(
        "{}{}",
        config.frontend_base_url(),
        Route::ApartmentDetails(id.clone()).path()
    )
}
