//! # Schoolboard
//!
//! List-view data pipeline and page view models for a school management
//! front end.
//!
//! ## Features
//!
//! - **One Pipeline**: fetch → filter → paginate → render, generic over the record type
//! - **Explicit State Machine**: `Idle → Loading → Success | Failure` per list view
//! - **Ordered Fetches**: request tokens drop results overtaken by a newer fetch
//! - **Configuration-Based**: base URL, identity and endpoints from YAML
//! - **Pluggable Transport**: reqwest by default, any [`Transport`](client::Transport) in tests
//! - **UI Independent**: pages yield plain rows and messages, nothing is drawn
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use schoolboard::prelude::*;
//!
//! let config = ClientConfig::from_yaml_file("schoolboard.yaml")?;
//! let ctx = PageContext::from_config(config)?;
//!
//! let notices = NoticeBoardPage::new(ctx.clone())?;
//! notices.load().await;
//!
//! for row in notices.table().rows {
//!     println!("{:?}", row);
//! }
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod pages;
pub mod telemetry;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ConfigError, FetchError},
        query::{ListQuery, PageState, PaginationMeta, apply_filters, paginate},
        record::ListItem,
        result::{FetchResult, SubmitResult},
        validation::{FormRules, validators},
    };

    // === Client ===
    pub use crate::client::{
        Endpoint, EndpointSource, Envelope, Fetcher, ListSource, Method, ReqwestTransport,
        RequestParams, Transport,
    };

    // === Views ===
    pub use crate::view::{
        ListController, ListView, PagerControls, RenderedRow, RenderedTable, TableSpec,
        ViewStatus,
    };

    // === Pages ===
    pub use crate::pages::{
        ChatListPage, ChildAttendancePage, ClassRoomPage, HomeworkPage, IssuedBookPage,
        NoticeBoardPage, PageContext, PhoneCallLogPage, StudentAttendancePage,
    };

    // === Config ===
    pub use crate::config::{ClientConfig, Identity};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
