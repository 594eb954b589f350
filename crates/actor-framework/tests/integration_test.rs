use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

/// A bucket of units that can be drawn from but never below zero.
#[derive(Clone, Debug, PartialEq)]
struct Bucket {
    id: u32,
    label: String,
    units: u32,
    draws: u32,
}

#[derive(Debug)]
struct BucketCreate {
    label: String,
    units: u32,
}

#[derive(Debug)]
struct BucketUpdate {
    label: Option<String>,
    units: Option<u32>,
}

#[derive(Debug)]
enum BucketAction {
    Draw(u32),
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum BucketError {
    #[error("label must not be empty")]
    EmptyLabel,
    #[error("only {available} units left")]
    Exhausted { available: u32 },
    #[error("bucket still holds {0} units")]
    NotEmpty(u32),
}

#[async_trait]
impl ActorEntity for Bucket {
    type Id = u32;
    type Create = BucketCreate;
    type Update = BucketUpdate;
    type Action = BucketAction;
    type ActionResult = u32;
    type Context = ();
    type Error = BucketError;

    fn from_create_params(id: u32, params: BucketCreate) -> Result<Self, Self::Error> {
        if params.label.is_empty() {
            return Err(BucketError::EmptyLabel);
        }
        Ok(Self {
            id,
            label: params.label,
            units: params.units,
            draws: 0,
        })
    }

    async fn on_update(
        &mut self,
        update: BucketUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        // Applies units first so a rejected label proves the staged copy is discarded.
        if let Some(units) = update.units {
            self.units = units;
        }
        if let Some(label) = update.label {
            if label.is_empty() {
                return Err(BucketError::EmptyLabel);
            }
            self.label = label;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        if self.units > 0 {
            return Err(BucketError::NotEmpty(self.units));
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: BucketAction,
        _ctx: &Self::Context,
    ) -> Result<u32, Self::Error> {
        match action {
            BucketAction::Draw(n) => {
                self.draws += 1;
                if self.units < n {
                    return Err(BucketError::Exhausted {
                        available: self.units,
                    });
                }
                self.units -= n;
                Ok(self.units)
            }
        }
    }
}

fn bucket(label: &str, units: u32) -> BucketCreate {
    BucketCreate {
        label: label.to_string(),
        units,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Bucket>::new(10);
    tokio::spawn(actor.run(()));

    let id: u32 = client.create(bucket("sand", 5)).await.unwrap();
    assert_eq!(id, 1);

    let left = client.perform_action(id, BucketAction::Draw(2)).await.unwrap();
    assert_eq!(left, 3);

    let update = BucketUpdate {
        label: Some("gravel".into()),
        units: Some(0),
    };
    let updated = client.update(id, update).await.unwrap();
    assert_eq!(updated.label, "gravel");
    assert_eq!(updated.units, 0);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_action_leaves_entity_untouched() {
    let (actor, client) = ResourceActor::<Bucket>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(bucket("sand", 1)).await.unwrap();

    let err = client
        .perform_action(id, BucketAction::Draw(2))
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_entity::<BucketError>().unwrap(),
        BucketError::Exhausted { available: 1 }
    );

    // The draw counter was bumped on the staged copy only.
    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.units, 1);
    assert_eq!(stored.draws, 0);
}

#[tokio::test]
async fn test_failed_update_leaves_entity_untouched() {
    let (actor, client) = ResourceActor::<Bucket>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(bucket("sand", 4)).await.unwrap();
    let update = BucketUpdate {
        label: Some(String::new()),
        units: Some(99),
    };
    assert!(client.update(id, update).await.is_err());

    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.units, 4);
    assert_eq!(stored.label, "sand");
}

#[tokio::test]
async fn test_on_delete_can_veto_removal() {
    let (actor, client) = ResourceActor::<Bucket>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(bucket("sand", 2)).await.unwrap();
    let err = client.delete(id).await.unwrap_err();
    assert_eq!(
        err.downcast_entity::<BucketError>().unwrap(),
        BucketError::NotEmpty(2)
    );
    assert!(client.get(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_missing_entity_is_not_found() {
    let (actor, client) = ResourceActor::<Bucket>::new(10);
    tokio::spawn(actor.run(()));

    let err = client
        .perform_action(42, BucketAction::Draw(1))
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(id) if id == "42"));
}

#[tokio::test]
async fn test_list_pages_in_id_order() {
    let (actor, client) = ResourceActor::<Bucket>::new(10);
    tokio::spawn(actor.run(()));

    for label in ["a", "b", "c", "d"] {
        client.create(bucket(label, 1)).await.unwrap();
    }

    let page = client.list(1, 2).await.unwrap();
    let labels: Vec<_> = page.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["b", "c"]);

    assert!(client.list(10, 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_scan_projects_inside_the_actor() {
    let (actor, client) = ResourceActor::<Bucket>::new(10);
    tokio::spawn(actor.run(()));

    for (label, units) in [("a", 0), ("b", 3), ("c", 0), ("d", 7)] {
        client.create(bucket(label, units)).await.unwrap();
    }

    let stocked: Vec<String> = client
        .scan(|buckets| {
            buckets
                .filter(|b| b.units > 0)
                .map(|b| b.label.clone())
                .collect::<Vec<_>>()
        })
        .await
        .unwrap();
    assert_eq!(stocked, vec!["b", "d"]);
    assert_eq!(client.count().await.unwrap(), 4);
}

#[tokio::test]
async fn test_concurrent_draws_never_overdraw() {
    let (actor, client) = ResourceActor::<Bucket>::new(64);
    tokio::spawn(actor.run(()));

    let id = client.create(bucket("sand", 10)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..25 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.perform_action(id, BucketAction::Draw(1)).await
        }));
    }

    let mut ok = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            ok += 1;
        }
    }

    assert_eq!(ok, 10);
    assert_eq!(client.get(id).await.unwrap().unwrap().units, 0);
}
