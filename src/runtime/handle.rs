use std::sync::Arc;

use tokio::sync::{Mutex, broadcast, mpsc, oneshot};
use tracing::{debug, warn};

use crate::{
    core::cart::{Cart, CartError},
    persist::{CART_STORAGE_KEY, CartStorage, PersistError, encode_items},
    product::CartItem,
    stock::{StockError, StockService},
    types::{Amount, ProductId},
};

use super::events::{CartEvent, CartNotice};

/// Errors surfaced by validated cart operations.
#[derive(Debug)]
pub enum RuntimeError {
    /// The requested quantity exceeds the currently available stock.
    StockExceeded {
        /// Targeted product id.
        product_id: ProductId,
        /// Quantity the operation asked for.
        requested: Amount,
        /// Quantity the stock service reported available.
        available: Amount,
    },
    /// Pure-cart rejection, including a missing entry.
    Cart(CartError),
    /// Stock service fault.
    Stock(StockError),
    /// Persistence fault.
    Persist(PersistError),
    /// The runtime loop has shut down.
    ChannelClosed,
}

impl From<CartError> for RuntimeError {
    fn from(value: CartError) -> Self {
        Self::Cart(value)
    }
}

impl From<StockError> for RuntimeError {
    fn from(value: StockError) -> Self {
        Self::Stock(value)
    }
}

impl From<PersistError> for RuntimeError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

/// Channel sizing for the runtime loop.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Bound of the command queue feeding the loop.
    pub cmd_queue_bound: usize,
    /// Capacity of the broadcast event stream.
    pub events_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            cmd_queue_bound: 256,
            events_capacity: 1024,
        }
    }
}

/// Cheaply cloneable handle to a spawned cart runtime.
pub struct CartHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<CartEvent>,
}

impl Clone for CartHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    AddProduct {
        id: ProductId,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    RemoveProduct {
        id: ProductId,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    UpdateAmount {
        id: ProductId,
        amount: Amount,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    Items {
        resp: oneshot::Sender<Vec<CartItem>>,
    },
    Get {
        id: ProductId,
        resp: oneshot::Sender<Option<CartItem>>,
    },
    Shutdown {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
}

type SharedStorage = Arc<Mutex<Box<dyn CartStorage>>>;

/// Spawns the single-writer cart loop and returns its handle.
///
/// The loop owns the cart and both ports. Commands are processed one at a
/// time, so mutations never validate against a snapshot another in-flight
/// mutation is about to replace.
pub fn spawn_cartstore(
    cart: Cart,
    storage: Box<dyn CartStorage>,
    stock: Box<dyn StockService>,
    config: RuntimeConfig,
) -> CartHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.cmd_queue_bound);
    let (events_tx, _) = broadcast::channel::<CartEvent>(config.events_capacity);

    let storage: SharedStorage = Arc::new(Mutex::new(storage));
    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut cart = cart;
        loop {
            let Some(cmd) = cmd_rx.recv().await else { break };
            let done =
                handle_command(cmd, &mut cart, &storage, &*stock, &events_tx_loop).await;
            if done {
                break;
            }
        }
    });

    CartHandle { cmd_tx, events_tx }
}

impl CartHandle {
    /// Subscribes to the runtime event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events_tx.subscribe()
    }

    /// Adds one unit of `id` to the cart, fetching metadata on first add.
    pub async fn add_product(&self, id: ProductId) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::AddProduct { id, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Removes the line item for `id` entirely.
    pub async fn remove_product(&self, id: ProductId) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::RemoveProduct { id, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Sets the quantity of an existing line item to an explicit value.
    ///
    /// An `amount` below 1 is treated as a caller-input guard: the call
    /// succeeds without touching state or emitting an event.
    pub async fn update_product_amount(
        &self,
        id: ProductId,
        amount: Amount,
    ) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::UpdateAmount {
                id,
                amount,
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Snapshot of the current line items, in cart order.
    pub async fn items(&self) -> Result<Vec<CartItem>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Items { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Line item for `id`, if present.
    pub async fn get(&self, id: ProductId) -> Result<Option<CartItem>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Get { id, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Stops the runtime loop after the in-flight commands drain.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }
}

async fn handle_command(
    cmd: Command,
    cart: &mut Cart,
    storage: &SharedStorage,
    stock: &dyn StockService,
    events_tx: &broadcast::Sender<CartEvent>,
) -> bool {
    match cmd {
        Command::AddProduct { id, resp } => {
            let res = add_product(cart, storage, stock, id).await;
            match &res {
                Ok(()) => {
                    debug!(product_id = id, "product added");
                    let _ = events_tx.send(CartEvent::Added {
                        id,
                        cart: cart.items_cloned(),
                    });
                }
                Err(err) => {
                    warn!(product_id = id, error = ?err, "add rejected");
                    let _ = events_tx.send(CartEvent::Rejected {
                        id,
                        notice: add_notice(err),
                    });
                }
            }
            let _ = resp.send(res);
        }
        Command::RemoveProduct { id, resp } => {
            let res = remove_product(cart, storage, id).await;
            match &res {
                Ok(()) => {
                    debug!(product_id = id, "product removed");
                    let _ = events_tx.send(CartEvent::Removed {
                        id,
                        cart: cart.items_cloned(),
                    });
                }
                Err(err) => {
                    warn!(product_id = id, error = ?err, "remove rejected");
                    let _ = events_tx.send(CartEvent::Rejected {
                        id,
                        notice: remove_notice(err),
                    });
                }
            }
            let _ = resp.send(res);
        }
        Command::UpdateAmount { id, amount, resp } => {
            if amount < 1 {
                // Caller-input guard, not an error: no mutation, no event.
                let _ = resp.send(Ok(()));
                return false;
            }
            let res = update_amount(cart, storage, stock, id, amount).await;
            match &res {
                Ok(()) => {
                    debug!(product_id = id, amount, "amount set");
                    let _ = events_tx.send(CartEvent::AmountSet {
                        id,
                        amount,
                        cart: cart.items_cloned(),
                    });
                }
                Err(err) => {
                    warn!(product_id = id, amount, error = ?err, "update rejected");
                    let _ = events_tx.send(CartEvent::Rejected {
                        id,
                        notice: update_notice(err),
                    });
                }
            }
            let _ = resp.send(res);
        }
        Command::Items { resp } => {
            let _ = resp.send(cart.items_cloned());
        }
        Command::Get { id, resp } => {
            let _ = resp.send(cart.get(id).cloned());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(Ok(()));
            return true;
        }
    }

    false
}

async fn add_product(
    cart: &mut Cart,
    storage: &SharedStorage,
    stock: &dyn StockService,
    id: ProductId,
) -> Result<(), RuntimeError> {
    let current = cart.amount_of(id);
    let level = stock.stock(id).await?;
    let desired = current.saturating_add(1);
    if desired > level.amount {
        return Err(RuntimeError::StockExceeded {
            product_id: id,
            requested: desired,
            available: level.amount,
        });
    }

    let mut next = cart.clone();
    if current > 0 {
        next.set_amount(id, desired)?;
    } else {
        let product = stock.product(id).await?;
        next.insert(CartItem::new(product, 1))?;
    }

    write_through(storage, next.items()).await?;
    *cart = next;
    Ok(())
}

async fn remove_product(
    cart: &mut Cart,
    storage: &SharedStorage,
    id: ProductId,
) -> Result<(), RuntimeError> {
    let mut next = cart.clone();
    next.remove(id)?;

    write_through(storage, next.items()).await?;
    *cart = next;
    Ok(())
}

async fn update_amount(
    cart: &mut Cart,
    storage: &SharedStorage,
    stock: &dyn StockService,
    id: ProductId,
    amount: Amount,
) -> Result<(), RuntimeError> {
    if !cart.contains(id) {
        return Err(RuntimeError::Cart(CartError::Missing(id)));
    }

    let level = stock.stock(id).await?;
    if amount > level.amount {
        return Err(RuntimeError::StockExceeded {
            product_id: id,
            requested: amount,
            available: level.amount,
        });
    }

    let mut next = cart.clone();
    next.set_amount(id, amount)?;

    write_through(storage, next.items()).await?;
    *cart = next;
    Ok(())
}

// Serializes `items` and writes the blob under the fixed cart key. Callers
// swap their state in only after this returns Ok.
async fn write_through(storage: &SharedStorage, items: &[CartItem]) -> Result<(), RuntimeError> {
    let blob = encode_items(items)?;
    let storage_ref = Arc::clone(storage);
    tokio::task::spawn_blocking(move || {
        let mut storage = storage_ref.blocking_lock();
        storage.set(CART_STORAGE_KEY, &blob)
    })
    .await
    .map_err(|e| RuntimeError::Persist(PersistError::Message(format!("join error: {e}"))))??;
    Ok(())
}

fn add_notice(err: &RuntimeError) -> CartNotice {
    match err {
        RuntimeError::StockExceeded { .. } => CartNotice::StockExceeded,
        _ => CartNotice::AddFailed,
    }
}

fn remove_notice(err: &RuntimeError) -> CartNotice {
    match err {
        RuntimeError::Cart(CartError::Missing(_)) => CartNotice::EntryNotFound,
        _ => CartNotice::RemoveFailed,
    }
}

fn update_notice(err: &RuntimeError) -> CartNotice {
    match err {
        RuntimeError::StockExceeded { .. } => CartNotice::StockExceeded,
        RuntimeError::Cart(CartError::Missing(_)) => CartNotice::EntryNotFound,
        _ => CartNotice::UpdateFailed,
    }
}
