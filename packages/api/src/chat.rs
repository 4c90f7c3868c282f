//! Properties handed to the hosted chat widget.
//!
//! The widget owns message transport, storage and presence. All this crate
//! decides is which identity it runs as and, for the community room, which room
//! and access key. Field names serialise to what the vendor SDK expects.
//!
//! [`mount_script`] is the JavaScript that loads the bridge script and the
//! vendor SDK, waits for both, mounts the widget and reports back with a
//! [`MountReport`]. Nothing is mounted before both scripts have loaded.

use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;
use crate::models::Identity;
use crate::session::{ChatView, SessionState};

/// Direct messages: the user's own chats, authenticated with their secret.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectChatProps {
    #[serde(rename = "projectID")]
    pub project_id: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "userSecret")]
    pub user_secret: String,
}

/// The shared community room, joined with the room's access key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityChatProps {
    #[serde(rename = "projectID")]
    pub project_id: String,
    #[serde(rename = "chatID")]
    pub chat_id: String,
    #[serde(rename = "chatAccessKey")]
    pub chat_access_key: String,
    #[serde(rename = "senderUsername")]
    pub sender_username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ChatWidgetProps {
    Direct(DirectChatProps),
    Community(CommunityChatProps),
}

impl DirectChatProps {
    pub fn new(config: &ChatConfig, identity: &Identity) -> Self {
        Self {
            project_id: config.project_id.clone(),
            user_name: identity.username.clone(),
            user_secret: identity.secret.clone(),
        }
    }
}

impl CommunityChatProps {
    pub fn new(config: &ChatConfig, identity: &Identity) -> Self {
        Self {
            project_id: config.project_id.clone(),
            chat_id: config.community_chat_id.clone(),
            chat_access_key: config.community_access_key.clone(),
            sender_username: identity.username.clone(),
        }
    }
}

impl ChatWidgetProps {
    /// Widget properties for a session, `None` when nobody is logged in.
    pub fn for_session(config: &ChatConfig, state: &SessionState) -> Option<Self> {
        match state {
            SessionState::LoggedIn {
                identity,
                view: ChatView::DirectChat,
            } => Some(Self::Direct(DirectChatProps::new(config, identity))),
            SessionState::LoggedIn {
                identity,
                view: ChatView::Community,
            } => Some(Self::Community(CommunityChatProps::new(config, identity))),
            SessionState::LoggedOut(_) => None,
        }
    }

    pub fn to_json(&self) -> String {
        // Only strings inside; serialisation cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// What the mount script sends back once it has finished.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MountReport {
    #[serde(default)]
    pub error: Option<String>,
}

impl MountReport {
    pub fn into_result(self) -> Result<(), String> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Quote `s` as a JavaScript string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Load `bridge_src` then `sdk_src` (each at most once per page), mount
/// `widget` into the element `mount_id` and send a [`MountReport`].
pub fn mount_script(
    bridge_src: &str,
    sdk_src: &str,
    mount_id: &str,
    widget: &ChatWidgetProps,
) -> String {
    format!(
        r#"(function() {{
            var loaded = window.MessengerChatScripts || (window.MessengerChatScripts = {{}});
            function load(src) {{
                if (!loaded[src]) {{
                    loaded[src] = new Promise(function(resolve, reject) {{
                        var script = document.createElement('script');
                        script.src = src;
                        script.onload = function() {{ resolve(); }};
                        script.onerror = function() {{
                            delete loaded[src];
                            reject(new Error('failed to load ' + src));
                        }};
                        document.head.appendChild(script);
                    }});
                }}
                return loaded[src];
            }}
            load({bridge_js})
                .then(function() {{ return load({sdk_js}); }})
                .then(function() {{
                    var el = document.getElementById({id_js});
                    if (!el) throw new Error('mount element missing');
                    window.MessengerChat.mount(el, {props});
                    dioxus.send({{ error: null }});
                }})
                .catch(function(e) {{
                    dioxus.send({{ error: String((e && e.message) || e) }});
                }});
        }})();"#,
        bridge_js = js_string(bridge_src),
        sdk_js = js_string(sdk_src),
        id_js = js_string(mount_id),
        props = widget.to_json(),
    )
}

/// Tear down whatever [`mount_script`] mounted into `mount_id`.
pub fn unmount_script(mount_id: &str) -> String {
    format!(
        r#"(function() {{
            var el = document.getElementById({id_js});
            if (window.MessengerChat && el) {{ window.MessengerChat.unmount(el); }}
        }})();"#,
        id_js = js_string(mount_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Transition;
    use serde_json::json;

    fn alice() -> Identity {
        Identity::from_response(json!({ "id": 1, "username": "alice" }), "alice", "secret123")
            .unwrap()
    }

    #[test]
    fn test_props_follow_session() {
        let config = ChatConfig::default();
        let mut state = SessionState::default();
        assert!(ChatWidgetProps::for_session(&config, &state).is_none());

        state.apply(Transition::AuthSucceeded(alice())).unwrap();
        let props = ChatWidgetProps::for_session(&config, &state).unwrap();
        assert_eq!(
            serde_json::to_value(&props).unwrap(),
            json!({
                "mode": "direct",
                "projectID": config.project_id,
                "userName": "alice",
                "userSecret": "secret123",
            })
        );

        state.apply(Transition::OpenCommunity).unwrap();
        let props = ChatWidgetProps::for_session(&config, &state).unwrap();
        assert_eq!(
            serde_json::to_value(&props).unwrap(),
            json!({
                "mode": "community",
                "projectID": config.project_id,
                "chatID": config.community_chat_id,
                "chatAccessKey": config.community_access_key,
                "senderUsername": "alice",
            })
        );
    }

    #[test]
    fn test_community_props_never_carry_user_secret() {
        let props = CommunityChatProps::new(&ChatConfig::default(), &alice());
        assert!(!ChatWidgetProps::Community(props).to_json().contains("secret123"));
    }

    #[test]
    fn test_mount_script_loads_sdk_before_mounting() {
        let config = ChatConfig::default();
        let widget = ChatWidgetProps::Direct(DirectChatProps::new(&config, &alice()));
        let script = mount_script("/assets/bridge.js", &config.sdk_url, "chat-widget", &widget);

        let bridge = script.find(r#"load("/assets/bridge.js")"#).unwrap();
        let sdk = script.find(r#"load("/chat-engine-embed.js")"#).unwrap();
        let mount = script.find("window.MessengerChat.mount(").unwrap();
        assert!(bridge < sdk && sdk < mount);
        assert!(script.contains(&widget.to_json()));
        assert!(script.contains(r#"getElementById("chat-widget")"#));
        assert!(script.contains("script.onerror"));
    }

    #[test]
    fn test_mount_script_quotes_sources() {
        let config = ChatConfig::default();
        let widget = ChatWidgetProps::Direct(DirectChatProps::new(&config, &alice()));
        let script = mount_script("/a.js", "https://cdn.test/x.js?q=\"');", "w", &widget);
        assert!(script.contains(r#"load("https://cdn.test/x.js?q=\"');")"#));
    }

    #[test]
    fn test_mount_report() {
        let ok: MountReport = serde_json::from_value(json!({ "error": null })).unwrap();
        assert_eq!(ok.into_result(), Ok(()));

        let failed: MountReport =
            serde_json::from_value(json!({ "error": "failed to load /chat-engine-embed.js" }))
                .unwrap();
        assert_eq!(
            failed.into_result(),
            Err("failed to load /chat-engine-embed.js".to_string())
        );
    }
}
