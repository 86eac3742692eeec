//! Generic CRUD bindings
//!
//! Every Zabbix entity exposes the same four methods (`<prefix>.create`,
//! `.get`, `.update`, `.delete`) and reports affected ids under the same
//! `<prefix>ids` key. [`Resource`] implements them once for any [`Entity`].
//!
//! Records are owned by the caller. Only the id field is ever written:
//! assigned after a successful create, cleared after a successful delete.
//! A failed call leaves every record as it was.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use zabbix_http::{HttpTransport, Transport};
use zabbix_protocol::{CallParams, Params};

use crate::client::core::{Client, decode_result};
use crate::error::{Error, Result};
use crate::types::{Action, User};

/// A record type bound to a Zabbix API object.
///
/// Implementors name the method prefix and id key and give access to the
/// id field; [`Resource`] does the rest.
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use zabbix_client::Entity;
///
/// #[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// struct HostGroup {
///     #[serde(default, skip_serializing_if = "String::is_empty")]
///     groupid: String,
///     name: String,
/// }
///
/// impl Entity for HostGroup {
///     const METHOD_PREFIX: &'static str = "hostgroup";
///     const IDS_KEY: &'static str = "groupids";
///
///     fn id(&self) -> &str {
///         &self.groupid
///     }
///
///     fn set_id(&mut self, id: String) {
///         self.groupid = id;
///     }
/// }
/// ```
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Method namespace, e.g. `action`
    const METHOD_PREFIX: &'static str;

    /// Key of the id list in get filters and create/delete results,
    /// e.g. `actionids`
    const IDS_KEY: &'static str;

    /// Server-assigned id; empty while unpersisted
    fn id(&self) -> &str;

    /// Overwrite the id
    fn set_id(&mut self, id: String);

    /// Reset the id to the unpersisted state
    fn clear_id(&mut self) {
        self.set_id(String::new());
    }

    /// Whether the record carries a server-assigned id
    fn is_persisted(&self) -> bool {
        !self.id().is_empty()
    }

    /// Full method name for `operation`, e.g. `action.create`
    fn method(operation: &str) -> String {
        format!("{}.{operation}", Self::METHOD_PREFIX)
    }
}

/// CRUD handle for one entity type, borrowed from a [`Client`].
pub struct Resource<'c, E: Entity, T: Transport + 'static = HttpTransport> {
    client: &'c Client<T>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity, T: Transport + 'static> Clone for Resource<'_, E, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Entity, T: Transport + 'static> Copy for Resource<'_, E, T> {}

impl<E: Entity, T: Transport + 'static> fmt::Debug for Resource<'_, E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("entity", &E::METHOD_PREFIX)
            .finish_non_exhaustive()
    }
}

impl<T: Transport + 'static> Client<T> {
    /// CRUD handle for any entity type
    pub fn resource<E: Entity>(&self) -> Resource<'_, E, T> {
        Resource {
            client: self,
            _entity: PhantomData,
        }
    }

    /// CRUD handle for actions
    pub fn actions(&self) -> Resource<'_, Action, T> {
        self.resource()
    }

    /// CRUD handle for users
    pub fn users(&self) -> Resource<'_, User, T> {
        self.resource()
    }
}

impl<'c, E: Entity, T: Transport + 'static> Resource<'c, E, T> {
    /// The client this handle calls through
    pub fn client(&self) -> &'c Client<T> {
        self.client
    }

    /// Create `records` and write the assigned ids back in input order.
    ///
    /// The id count is checked before any record is touched.
    ///
    /// # Errors
    ///
    /// [`Error::ExpectedMore`] if the server reports a different number of
    /// ids than records sent; otherwise as [`Client::call`].
    pub async fn create(&self, records: &mut [E]) -> Result<()> {
        let method = E::method("create");
        let params = CallParams::from_records(&*records).map_err(|e| Error::encode(&method, e))?;

        let result = self.client.call(&method, params).await?;
        let ids = ids_from_result(&method, E::IDS_KEY, result)?;
        check_count(&method, records.len(), ids.len())?;

        for (record, id) in records.iter_mut().zip(ids) {
            record.set_id(id);
        }
        debug!(method = %method, count = records.len(), "Created records");
        Ok(())
    }

    /// Fetch records matching `params`.
    ///
    /// `"output": "extend"` is added unless the caller chose an output.
    ///
    /// # Errors
    ///
    /// As [`Client::call_into`].
    pub async fn get(&self, mut params: Params) -> Result<Vec<E>> {
        params.ensure_output_extend();
        self.client.call_into(&E::method("get"), params).await
    }

    /// Fetch the single record with `id`.
    ///
    /// # Errors
    ///
    /// [`Error::ExpectedOneResult`] unless exactly one record matches;
    /// otherwise as [`Resource::get`].
    pub async fn get_by_id(&self, id: &str) -> Result<E> {
        let mut records = self.get(Params::new().with(E::IDS_KEY, id)).await?;
        if records.len() != 1 {
            warn!(
                entity = E::METHOD_PREFIX,
                id,
                got = records.len(),
                "Lookup by id did not match exactly one record"
            );
            return Err(Error::ExpectedOneResult(records.len()));
        }
        Ok(records.remove(0))
    }

    /// Update `records`. Ids are sent as-is and not reconciled.
    ///
    /// # Errors
    ///
    /// As [`Client::call`].
    pub async fn update(&self, records: &[E]) -> Result<()> {
        let method = E::method("update");
        let params = CallParams::from_records(records).map_err(|e| Error::encode(&method, e))?;
        self.client.call(&method, params).await?;
        Ok(())
    }

    /// Delete `records` by id and clear their ids on success.
    ///
    /// # Errors
    ///
    /// As [`Resource::delete_by_ids`]; records are left unchanged.
    pub async fn delete(&self, records: &mut [E]) -> Result<()> {
        let ids: Vec<String> = records.iter().map(|r| r.id().to_owned()).collect();
        self.delete_by_ids(&ids).await?;

        records.iter_mut().for_each(E::clear_id);
        Ok(())
    }

    /// Delete by id list.
    ///
    /// # Errors
    ///
    /// [`Error::ExpectedMore`] if the server reports a different number of
    /// deleted ids; otherwise as [`Client::call`].
    pub async fn delete_by_ids<S: AsRef<str> + Sync>(&self, ids: &[S]) -> Result<()> {
        let method = E::method("delete");
        let result = self.client.call(&method, CallParams::from_ids(ids)).await?;

        let deleted = ids_from_result(&method, E::IDS_KEY, result)?;
        check_count(&method, ids.len(), deleted.len())?;
        debug!(method = %method, count = ids.len(), "Deleted records");
        Ok(())
    }
}

fn check_count(method: &str, expected: usize, got: usize) -> Result<()> {
    if expected == got {
        return Ok(());
    }
    warn!(method, expected, got, "Affected id count does not match request");
    Err(Error::ExpectedMore { expected, got })
}

/// Ids come back as strings; tolerate servers that send bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum ReportedId {
    Text(String),
    Number(u64),
}

impl From<ReportedId> for String {
    fn from(id: ReportedId) -> Self {
        match id {
            ReportedId::Text(id) => id,
            ReportedId::Number(id) => id.to_string(),
        }
    }
}

/// Extract `{ids_key: [..]}` from a create/delete result.
fn ids_from_result(method: &str, ids_key: &'static str, result: Value) -> Result<Vec<String>> {
    let mut object: Map<String, Value> = decode_result(method, result)?;
    let ids = object
        .remove(ids_key)
        .ok_or_else(|| Error::decode(method, serde_json::Error::missing_field(ids_key)))?;

    let ids: Vec<ReportedId> = decode_result(method, ids)?;
    Ok(ids.into_iter().map(String::from).collect())
}
