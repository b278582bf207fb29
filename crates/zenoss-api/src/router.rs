// Zenoss request routers
//
// Each sub-API of the Zenoss JSON API is served by a "router" living at
// `/zport/dmd/{path}_router`. The set is fixed; anything else is rejected
// before a request is built.

use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::Error;

/// One of the fixed Zenoss JSON API routers.
///
/// `Display` and `FromStr` use the router's action name
/// (e.g. `DeviceRouter`), which is also the `action` field of the envelope.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum Router {
    MessagingRouter,
    EventsRouter,
    ProcessRouter,
    ServiceRouter,
    DeviceRouter,
    NetworkRouter,
    TemplateRouter,
    DetailNavRouter,
    ReportRouter,
    MibRouter,
    ZenPackRouter,
}

impl Router {
    /// The URL path segment, without the `_router` suffix.
    pub fn path(self) -> &'static str {
        match self {
            Self::MessagingRouter => "messaging",
            Self::EventsRouter => "evconsole",
            Self::ProcessRouter => "process",
            Self::ServiceRouter => "service",
            Self::DeviceRouter => "device",
            Self::NetworkRouter => "network",
            Self::TemplateRouter => "template",
            Self::DetailNavRouter => "detailnav",
            Self::ReportRouter => "report",
            Self::MibRouter => "mib",
            Self::ZenPackRouter => "zenpack",
        }
    }

    /// The endpoint path relative to the server root:
    /// `/zport/dmd/{path}_router`.
    pub fn endpoint(self) -> String {
        format!("/zport/dmd/{}_router", self.path())
    }

    /// The action name sent in the request envelope.
    pub fn action(self) -> &'static str {
        self.into()
    }

    /// Look up a router by its exact action name.
    pub fn lookup(name: &str) -> Result<Self, Error> {
        Self::from_str(name).map_err(|_| Error::InvalidRouter {
            name: name.to_owned(),
        })
    }

    /// All routers in table order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}
