//! Per-record hooks fired by the fixture commands.
//!
//! Hooks replace broadcast signals: the caller builds a registry, connects
//! hooks keyed by model id, and hands the registry to the command for the
//! duration of one invocation. Receivers run synchronously in connection
//! order, and the first failing receiver aborts the command.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SeedingResult;
use crate::fixtures::FixtureRecord;
use crate::schema::ModelSchema;

/// Hook invoked immediately before a record is serialized.
#[async_trait]
pub trait PreDumpHook: Send + Sync {
	/// Called with the record about to be converted to its output form.
	async fn pre_dump(&self, schema: &ModelSchema, record: &FixtureRecord) -> SeedingResult<()>;
}

/// Hook invoked immediately before a record is persisted.
#[async_trait]
pub trait PreSaveHook: Send + Sync {
	/// Called with the record about to be written to the record store.
	async fn pre_save(&self, schema: &ModelSchema, record: &FixtureRecord) -> SeedingResult<()>;
}

/// Hooks keyed by the model id they listen to.
pub struct HookRegistry<H: ?Sized> {
	receivers: HashMap<String, Vec<Arc<H>>>,
}

impl<H: ?Sized> HookRegistry<H> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			receivers: HashMap::new(),
		}
	}

	/// Connects a hook to records of the given model.
	///
	/// Connecting the same hook twice for a model is a no-op.
	pub fn connect(&mut self, model_id: impl Into<String>, hook: Arc<H>) {
		let receivers = self.receivers.entry(model_id.into()).or_default();
		if !receivers.iter().any(|existing| Arc::ptr_eq(existing, &hook)) {
			receivers.push(hook);
		}
	}

	/// Disconnects every hook listening to the given model.
	pub fn disconnect(&mut self, model_id: &str) -> bool {
		self.receivers.remove(model_id).is_some()
	}

	/// Hooks connected to the given model, in connection order.
	pub fn receivers(&self, model_id: &str) -> &[Arc<H>] {
		self.receivers
			.get(model_id)
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	/// Checks whether any hook listens to the given model.
	pub fn is_connected(&self, model_id: &str) -> bool {
		!self.receivers(model_id).is_empty()
	}

	/// Number of models with at least one hook.
	pub fn len(&self) -> usize {
		self.receivers.len()
	}

	/// Returns true if no hooks are connected.
	pub fn is_empty(&self) -> bool {
		self.receivers.is_empty()
	}
}

impl<H: ?Sized> Default for HookRegistry<H> {
	fn default() -> Self {
		Self::new()
	}
}

impl<H: ?Sized> std::fmt::Debug for HookRegistry<H> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut models: Vec<&String> = self.receivers.keys().collect();
		models.sort();
		f.debug_struct("HookRegistry")
			.field("models", &models)
			.finish()
	}
}

/// Registry of pre-dump hooks.
pub type PreDumpHooks = HookRegistry<dyn PreDumpHook>;

/// Registry of pre-save hooks.
pub type PreSaveHooks = HookRegistry<dyn PreSaveHook>;

impl HookRegistry<dyn PreDumpHook> {
	/// Runs every pre-dump hook connected to the record's model.
	pub async fn send(&self, schema: &ModelSchema, record: &FixtureRecord) -> SeedingResult<()> {
		for hook in self.receivers(&schema.model_id) {
			hook.pre_dump(schema, record).await?;
		}
		Ok(())
	}
}

impl HookRegistry<dyn PreSaveHook> {
	/// Runs every pre-save hook connected to the record's model.
	pub async fn send(&self, schema: &ModelSchema, record: &FixtureRecord) -> SeedingResult<()> {
		for hook in self.receivers(&schema.model_id) {
			hook.pre_save(schema, record).await?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::SeedingError;
	use parking_lot::Mutex;
	use rstest::rstest;
	use serde_json::json;

	#[derive(Default)]
	struct Recorder {
		seen: Mutex<Vec<String>>,
	}

	#[async_trait]
	impl PreDumpHook for Recorder {
		async fn pre_dump(&self, schema: &ModelSchema, record: &FixtureRecord) -> SeedingResult<()> {
			self.seen
				.lock()
				.push(format!("{}:{}", schema.model_id, record.fields["title"]));
			Ok(())
		}
	}

	struct Failing;

	#[async_trait]
	impl PreSaveHook for Failing {
		async fn pre_save(&self, _schema: &ModelSchema, _record: &FixtureRecord) -> SeedingResult<()> {
			Err(SeedingError::StoreError("refused".to_string()))
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_send_only_reaches_connected_model() {
		let recorder = Arc::new(Recorder::default());
		let mut hooks = PreDumpHooks::new();
		hooks.connect("gallery.Photo", recorder.clone() as Arc<dyn PreDumpHook>);

		let photo = ModelSchema::new("gallery.Photo");
		let album = ModelSchema::new("gallery.Album");
		hooks
			.send(&photo, &FixtureRecord::new("gallery.Photo", json!({"title": "cat"})))
			.await
			.unwrap();
		hooks
			.send(&album, &FixtureRecord::new("gallery.Album", json!({"title": "pets"})))
			.await
			.unwrap();

		assert_eq!(*recorder.seen.lock(), vec!["gallery.Photo:\"cat\"".to_string()]);
	}

	#[rstest]
	fn test_connect_is_idempotent() {
		let recorder: Arc<dyn PreDumpHook> = Arc::new(Recorder::default());
		let mut hooks = PreDumpHooks::new();
		hooks.connect("gallery.Photo", recorder.clone());
		hooks.connect("gallery.Photo", recorder);

		assert_eq!(hooks.receivers("gallery.Photo").len(), 1);
		assert!(hooks.is_connected("gallery.Photo"));
		assert!(!hooks.is_connected("gallery.Album"));
	}

	#[rstest]
	fn test_disconnect() {
		let mut hooks = PreDumpHooks::new();
		hooks.connect("gallery.Photo", Arc::new(Recorder::default()) as Arc<dyn PreDumpHook>);
		assert!(hooks.disconnect("gallery.Photo"));
		assert!(hooks.is_empty());
		assert!(!hooks.disconnect("gallery.Photo"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_failing_hook_propagates() {
		let mut hooks = PreSaveHooks::new();
		hooks.connect("gallery.Photo", Arc::new(Failing) as Arc<dyn PreSaveHook>);

		let schema = ModelSchema::new("gallery.Photo");
		let result = hooks
			.send(&schema, &FixtureRecord::new("gallery.Photo", json!({})))
			.await;
		assert!(matches!(result, Err(SeedingError::StoreError(_))));
	}
}
