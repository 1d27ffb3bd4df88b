//! Signed-in state shared with the navigation shell.
//!
//! Only presence of a session is tracked; the auth flow lives elsewhere.

use tokio::sync::watch;
use tracing::debug;

#[derive(Debug)]
pub struct SessionSignal {
    sender: watch::Sender<bool>,
}

impl SessionSignal {
    pub fn new(signed_in: bool) -> Self {
        let (sender, _) = watch::channel(signed_in);
        SessionSignal { sender }
    }

    pub fn is_signed_in(&self) -> bool {
        *self.sender.borrow()
    }

    pub fn set_signed_in(&self, signed_in: bool) {
        self.sender.send_if_modified(|current| {
            if *current == signed_in {
                return false;
            }
            *current = signed_in;
            true
        });
    }

    pub fn subscribe(&self) -> SessionSubscription {
        debug!("Session subscriber added ({} total)", self.sender.receiver_count() + 1);
        SessionSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Live view of the session flag. Dropping it unsubscribes.
#[derive(Debug)]
pub struct SessionSubscription {
    receiver: watch::Receiver<bool>,
}

impl SessionSubscription {
    pub fn current(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Waits for the next change. `None` once the signal is gone.
    pub async fn changed(&mut self) -> Option<bool> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }

    pub fn unsubscribe(self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Link(&'static str),
    SignOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub action: NavAction,
}

pub fn nav_links(signed_in: bool) -> Vec<NavLink> {
    let mut links = vec![
        NavLink { label: "Home", action: NavAction::Link("/") },
        NavLink { label: "Products", action: NavAction::Link("/products") },
    ];

    if signed_in {
        links.push(NavLink { label: "Dashboard", action: NavAction::Link("/dashboard") });
        links.push(NavLink { label: "Sign Out", action: NavAction::SignOut });
    } else {
        links.push(NavLink { label: "Sign In", action: NavAction::Link("/auth") });
    }

    links
}
