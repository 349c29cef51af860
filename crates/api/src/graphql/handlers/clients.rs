// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::{FieldResult, ID, graphql_object};

use crate::{
    db::models::{Client, NewClient},
    graphql::{Context, parse_id},
};

#[graphql_object]
#[graphql(context = Context)]
impl Client {
    pub fn id(&self) -> ID {
        ID::from(self.id.to_string())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

pub async fn get_clients(ctx: &Context) -> FieldResult<Vec<Client>> {
    Ok(ctx.store().list_clients().await?)
}

pub async fn get_client(ctx: &Context, id: Option<ID>) -> FieldResult<Option<Client>> {
    let Some(id) = id else {
        return Ok(None);
    };
    let client_id = parse_id(&id)?;
    Ok(ctx.store().find_client(client_id).await?)
}

pub async fn add_client(
    ctx: &Context,
    name: String,
    email: String,
    phone: String,
) -> FieldResult<Client> {
    let client = ctx
        .store()
        .insert_client(NewClient { name, email, phone })
        .await?;

    tracing::info!(
        client_id = %client.id,
        ip = %ctx.get_ip(),
        user_agent = ctx.get_user_agent(),
        "Added client"
    );
    Ok(client)
}

pub async fn delete_client(ctx: &Context, id: ID) -> FieldResult<Option<Client>> {
    let client_id = parse_id(&id)?;
    let deleted = ctx.store().delete_client(client_id).await?;

    match &deleted {
        Some(_) => tracing::info!(%client_id, ip = %ctx.get_ip(), "Deleted client and its projects"),
        None => tracing::debug!(%client_id, "Client to delete does not exist"),
    }
    Ok(deleted)
}
