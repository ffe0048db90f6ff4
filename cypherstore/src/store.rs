use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::model::{Collapsed, NodeModel, RelationModel};
use crate::parser;
use crate::request::{
    CreateRelationRequest, CreateRequest, CypherRequest, EndNodesRequest, ExistsRequest,
    FindRelationRequest, FindRequest, IdRequest, NodesOnRelationRequest, RelationExistsRequest,
    RemoveRelationRequest, RemoveRequest, StartNodesRequest, UpdateByIdRequest,
    UpdateRelationRequest, UpdateRequest,
};
use cypherstore_api::{Driver, Identity, Record, Session, Statement};
use cypherstore_query::compile::{self, SetMode};
use cypherstore_query::{ListOptions, NODE_VAR, OTHER_NODE_VAR, REL_VAR};
use futures::TryStreamExt;
use tracing::{debug, trace, warn};

const COUNT_COLUMN: &str = "count";

const NODE_CHECK_MISSING: &str = "No ID or query or labels given, can not check for existence";
const RELATION_CHECK_MISSING: &str = "No ID or query or type given, can not check for existence";

/// CRUD and graph operations over a Cypher-speaking database.
///
/// Each operation compiles one statement, runs it on a lazily opened
/// session, drains the whole record stream and closes the session again
/// before the result is returned. Errors reported by the session are passed
/// through as [`Error::Session`].
///
/// Operations take `&mut self`, so one store never runs two statements at
/// the same time.
pub struct Store<D: Driver> {
    driver: D,
    session: Option<D::Session>,
    config: StoreConfig,
}

impl<D: Driver> Store<D> {
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, StoreConfig::default())
    }

    pub fn with_config(driver: D, config: StoreConfig) -> Self {
        Self {
            driver,
            session: None,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Whether a session is currently open. Always false between operations.
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    fn session(&mut self) -> &mut D::Session {
        self.session.get_or_insert_with(|| {
            trace!("store.session.acquire");
            self.driver.session()
        })
    }

    fn release(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
            trace!("store.session.release");
        }
    }

    /// Runs one statement to completion and releases the session, whatever
    /// the outcome.
    async fn run(&mut self, statement: Statement) -> Result<Vec<Record>> {
        debug!(
            text = statement.text(),
            params = statement.params().map_or(0, |p| p.len()),
            "store.statement"
        );

        let outcome = self
            .session()
            .run(statement)
            .try_collect::<Vec<_>>()
            .await;
        self.release();

        outcome.map_err(|err| {
            warn!(error = %err, "store.statement.failed");
            Error::session(err)
        })
    }

    // --- nodes ---------------------------------------------------------

    /// Creates one node. Falls back to the configured default label when the
    /// request names none.
    pub async fn create(&mut self, req: CreateRequest) -> Result<Option<NodeModel>> {
        let labels = if req.labels.is_empty() {
            vec![self.config.default_label.clone()]
        } else {
            req.labels
        };
        let records = self.run(compile::create(&labels, &req.data)).await?;
        parser::first_node(records, NODE_VAR)
    }

    /// Deletes matching nodes and returns how many were removed.
    pub async fn remove(&mut self, req: RemoveRequest) -> Result<u64> {
        let records = self
            .run(compile::remove(&req.labels, req.query.as_ref()))
            .await?;
        parser::count(records, COUNT_COLUMN)
    }

    pub async fn remove_by_id(&mut self, req: IdRequest) -> Result<u64> {
        let records = self.run(compile::remove_by_id(req.id)).await?;
        parser::count(records, COUNT_COLUMN)
    }

    /// Merges `data` into every matching node.
    pub async fn update(&mut self, req: UpdateRequest) -> Result<Collapsed<NodeModel>> {
        self.set_nodes(req, SetMode::Merge).await
    }

    /// Overwrites the properties of every matching node with `data`.
    pub async fn replace(&mut self, req: UpdateRequest) -> Result<Collapsed<NodeModel>> {
        self.set_nodes(req, SetMode::Overwrite).await
    }

    async fn set_nodes(
        &mut self,
        req: UpdateRequest,
        mode: SetMode,
    ) -> Result<Collapsed<NodeModel>> {
        let statement = compile::update(&req.labels, req.query.as_ref(), &req.data, mode);
        let records = self.run(statement).await?;
        parser::all_nodes(records, NODE_VAR).map(Collapsed::from_vec)
    }

    pub async fn update_by_id(&mut self, req: UpdateByIdRequest) -> Result<Option<NodeModel>> {
        self.set_node_by_id(req, SetMode::Merge).await
    }

    pub async fn replace_by_id(&mut self, req: UpdateByIdRequest) -> Result<Option<NodeModel>> {
        self.set_node_by_id(req, SetMode::Overwrite).await
    }

    async fn set_node_by_id(
        &mut self,
        req: UpdateByIdRequest,
        mode: SetMode,
    ) -> Result<Option<NodeModel>> {
        let records = self
            .run(compile::update_by_id(req.id, &req.data, mode))
            .await?;
        parser::first_node(records, NODE_VAR)
    }

    /// Lists matching nodes. `Ok(None)` for a `limit` of 0, without touching
    /// the database.
    pub async fn find(&mut self, req: FindRequest) -> Result<Option<Vec<NodeModel>>> {
        if is_empty_page(req.options.as_ref()) {
            debug!("store.find.empty_page");
            return Ok(None);
        }
        let statement = compile::find(&req.labels, req.query.as_ref(), req.options.as_ref());
        let records = self.run(statement).await?;
        parser::all_nodes(records, NODE_VAR).map(Some)
    }

    pub async fn find_by_id(&mut self, req: IdRequest) -> Result<Option<NodeModel>> {
        let records = self.run(compile::find_by_id(req.id)).await?;
        parser::first_node(records, NODE_VAR)
    }

    /// Checks for a node by identity, or else by filter and labels.
    ///
    /// A negative id is ignored. With no usable id, no filter and no labels
    /// the request is rejected with a [`Error::Precondition`].
    pub async fn exists(&mut self, req: ExistsRequest) -> Result<bool> {
        if let Some(id) = usable_id(req.id) {
            return Ok(self.find_by_id(IdRequest { id }).await?.is_some());
        }

        let has_filter = req.query.as_ref().is_some_and(|q| !q.is_empty());
        if has_filter || !req.labels.is_empty() {
            let found = self
                .find(FindRequest {
                    labels: req.labels,
                    query: req.query,
                    options: Some(ListOptions::with_limit(1)),
                })
                .await?;
            return Ok(found.is_some_and(|nodes| !nodes.is_empty()));
        }

        warn!(operation = "exists", "store.precondition.rejected");
        Err(Error::exists(NODE_CHECK_MISSING))
    }

    // --- relationships -------------------------------------------------

    pub async fn create_relation(
        &mut self,
        req: CreateRelationRequest,
    ) -> Result<Vec<RelationModel>> {
        let statement =
            compile::create_relation(&req.from, req.rel_type.as_deref(), &req.to, &req.data);
        let records = self.run(statement).await?;
        parser::all_relations(records, REL_VAR)
    }

    pub async fn update_relation(
        &mut self,
        req: UpdateRelationRequest,
    ) -> Result<Vec<RelationModel>> {
        self.set_relations(req, SetMode::Merge).await
    }

    pub async fn replace_relation(
        &mut self,
        req: UpdateRelationRequest,
    ) -> Result<Vec<RelationModel>> {
        self.set_relations(req, SetMode::Overwrite).await
    }

    async fn set_relations(
        &mut self,
        req: UpdateRelationRequest,
        mode: SetMode,
    ) -> Result<Vec<RelationModel>> {
        let statement = compile::update_relation(&req.spec(), &req.data, mode);
        let records = self.run(statement).await?;
        parser::all_relations(records, REL_VAR)
    }

    pub async fn update_relation_by_id(
        &mut self,
        req: UpdateByIdRequest,
    ) -> Result<Option<RelationModel>> {
        self.set_relation_by_id(req, SetMode::Merge).await
    }

    pub async fn replace_relation_by_id(
        &mut self,
        req: UpdateByIdRequest,
    ) -> Result<Option<RelationModel>> {
        self.set_relation_by_id(req, SetMode::Overwrite).await
    }

    async fn set_relation_by_id(
        &mut self,
        req: UpdateByIdRequest,
        mode: SetMode,
    ) -> Result<Option<RelationModel>> {
        let records = self
            .run(compile::update_relation_by_id(req.id, &req.data, mode))
            .await?;
        parser::first_relation(records, REL_VAR)
    }

    pub async fn remove_relation(&mut self, req: RemoveRelationRequest) -> Result<u64> {
        let records = self.run(compile::remove_relation(&req.spec())).await?;
        parser::count(records, COUNT_COLUMN)
    }

    pub async fn remove_relation_by_id(&mut self, req: IdRequest) -> Result<u64> {
        let records = self.run(compile::remove_relation_by_id(req.id)).await?;
        parser::count(records, COUNT_COLUMN)
    }

    /// Lists distinct matching relationships. `Ok(None)` for a `limit` of 0.
    pub async fn find_relation(
        &mut self,
        req: FindRelationRequest,
    ) -> Result<Option<Vec<RelationModel>>> {
        if is_empty_page(req.options.as_ref()) {
            debug!("store.find_relation.empty_page");
            return Ok(None);
        }
        let statement = compile::find_relation(&req.spec(), req.options.as_ref());
        let records = self.run(statement).await?;
        parser::all_relations(records, REL_VAR).map(Some)
    }

    /// Nodes where a matching relationship towards `to` starts.
    pub async fn find_relation_start_nodes(
        &mut self,
        req: StartNodesRequest,
    ) -> Result<Option<Vec<NodeModel>>> {
        if is_empty_page(req.options.as_ref()) {
            return Ok(None);
        }
        let statement = compile::find_relation_start_nodes(
            &req.to,
            req.rel_type.as_deref(),
            req.query.as_ref(),
            req.options.as_ref(),
        );
        let records = self.run(statement).await?;
        parser::all_nodes(records, NODE_VAR).map(Some)
    }

    /// Nodes where a matching relationship from `from` ends.
    pub async fn find_relation_end_nodes(
        &mut self,
        req: EndNodesRequest,
    ) -> Result<Option<Vec<NodeModel>>> {
        if is_empty_page(req.options.as_ref()) {
            return Ok(None);
        }
        let statement = compile::find_relation_end_nodes(
            &req.from,
            req.rel_type.as_deref(),
            req.query.as_ref(),
            req.options.as_ref(),
        );
        let records = self.run(statement).await?;
        parser::all_nodes(records, OTHER_NODE_VAR).map(Some)
    }

    /// Nodes joined to `any_node` by a matching relationship, in either
    /// direction.
    pub async fn find_nodes_on_relation(
        &mut self,
        req: NodesOnRelationRequest,
    ) -> Result<Option<Vec<NodeModel>>> {
        if is_empty_page(req.options.as_ref()) {
            return Ok(None);
        }
        let statement = compile::find_nodes_on_relation(
            &req.any_node,
            req.rel_type.as_deref(),
            req.query.as_ref(),
            req.options.as_ref(),
        );
        let records = self.run(statement).await?;
        parser::all_nodes(records, NODE_VAR).map(Some)
    }

    pub async fn find_relation_by_id(&mut self, req: IdRequest) -> Result<Option<RelationModel>> {
        let records = self.run(compile::find_relation_by_id(req.id)).await?;
        parser::first_relation(records, REL_VAR)
    }

    /// Checks for a relationship by identity, or else by type and endpoints.
    pub async fn relation_exists(&mut self, req: RelationExistsRequest) -> Result<bool> {
        if let Some(id) = usable_id(req.id) {
            return Ok(self.find_relation_by_id(IdRequest { id }).await?.is_some());
        }

        let has_type = req.rel_type.as_deref().is_some_and(|t| !t.is_empty());
        if has_type || req.from.is_defined() || req.to.is_defined() {
            let found = self
                .find_relation(FindRelationRequest {
                    from: req.from,
                    rel_type: req.rel_type,
                    to: req.to,
                    any_direction: req.any_direction,
                    query: None,
                    options: Some(ListOptions::with_limit(1)),
                })
                .await?;
            return Ok(found.is_some_and(|rels| !rels.is_empty()));
        }

        warn!(operation = "relation_exists", "store.precondition.rejected");
        Err(Error::exists(RELATION_CHECK_MISSING))
    }

    // --- passthrough ---------------------------------------------------

    /// Runs caller-supplied Cypher and returns the raw records. An empty
    /// parameter map is dropped; list columns can be mapped with
    /// [`parser::normalize_nodes`] and [`parser::normalize_relations`].
    pub async fn execute_cypher_query(&mut self, req: CypherRequest) -> Result<Vec<Record>> {
        let params = req.parameters.filter(|p| !p.is_empty());
        let statement = Statement::new(req.query).with_optional_params(params);
        self.run(statement).await
    }
}

fn is_empty_page(options: Option<&ListOptions>) -> bool {
    options.is_some_and(ListOptions::is_empty_page)
}

fn usable_id(id: Option<Identity>) -> Option<Identity> {
    id.filter(|id| id.get() >= 0)
}
