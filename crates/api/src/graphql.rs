// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{net::IpAddr, sync::Arc};

use juniper::{EmptySubscription, ID};
pub use mutation::Mutation;
pub use query::Query;
use uuid::Uuid;

use crate::db::Store;

mod handlers;
mod mutation;
mod query;

#[derive(Clone)]
pub struct BaseContext {
    pub store: Arc<dyn Store>,
}

pub struct Context {
    base: BaseContext,
    ip: IpAddr,
    user_agent: String,
}

impl juniper::Context for Context {}

impl Context {
    pub fn new(base: BaseContext, ip: IpAddr, user_agent: String) -> Self {
        Self {
            base,
            ip,
            user_agent,
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.base.store.as_ref()
    }

    pub fn get_ip(&self) -> &IpAddr {
        &self.ip
    }

    pub fn get_user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Parses a GraphQL `ID` argument into a record id.
pub(crate) fn parse_id(id: &ID) -> juniper::FieldResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| {
        juniper::FieldError::new(format!("Invalid ID: {}", &**id), juniper::Value::null())
    })
}

pub type Schema = juniper::RootNode<Query, Mutation, EmptySubscription<Context>>;

pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
