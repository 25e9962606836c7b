//! Fixed WebUI method vocabulary.

pub const AUTH_LOGIN: &str = "auth.login";
pub const AUTH_CHECK_SESSION: &str = "auth.check_session";
pub const WEB_CONNECTED: &str = "web.connected";
pub const WEB_GET_HOSTS: &str = "web.get_hosts";
pub const WEB_CONNECT: &str = "web.connect";
pub const WEB_ADD_TORRENTS: &str = "web.add_torrents";
pub const WEB_DOWNLOAD_TORRENT_FROM_URL: &str = "web.download_torrent_from_url";
pub const WEB_UPDATE_UI: &str = "web.update_ui";
