//! Demo driver: starts a seeded storefront and runs a few concurrent shopping sessions against it.

use actor_framework::tracing::setup_tracing;
use storefront::clients::PageRequest;
use storefront::config::StorefrontConfig;
use storefront::lifecycle::Storefront;
use storefront::model::{CartMutation, CartSessionId};
use storefront::product_actor::CartError;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = StorefrontConfig::from_env()?;
    let sessions = config.demo_sessions;
    let storefront = Storefront::start(config).await?;
    let health = storefront.health().await;
    info!(?health, "Storefront ready");

    let catalog = storefront
        .product_client
        .list_products(PageRequest::default())
        .await?;
    if catalog.is_empty() {
        info!("Catalog is empty, nothing to shop for");
        storefront.shutdown().await?;
        return Ok(());
    }

    let mut shoppers = Vec::with_capacity(sessions);
    for n in 0..sessions {
        let cart = storefront.cart_client.clone();
        let product = catalog[n % catalog.len()].id;
        let session = CartSessionId(format!("demo-session-{n}"));
        let span = tracing::info_span!("session", %session);

        shoppers.push(tokio::spawn(
            async move {
                let line = cart.add_to_cart(session.clone(), product, 2).await?;
                info!(line = %line.line.id, product = %line.product.name, "Added two units");

                if let CartMutation::Updated(view) =
                    cart.set_cart_quantity(session.clone(), product, 1).await?
                {
                    info!(quantity = view.line.quantity, stock = view.product.stock_quantity, "Adjusted line");
                }

                let lines = cart.get_cart(&session).await?;
                info!(lines = lines.len(), "Cart contents");

                let removed = cart.remove_from_cart(session, product).await?;
                info!(released = removed.released, stock = removed.stock_quantity, "Emptied cart");
                Ok::<_, CartError>(())
            }
            .instrument(span),
        ));
    }

    for shopper in shoppers {
        match shopper.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(error = %e, "Session failed"),
            Err(e) => error!(error = %e, "Session task panicked"),
        }
    }

    storefront.shutdown().await?;
    info!("Demo completed");
    Ok(())
}
