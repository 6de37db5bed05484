//! Mock contactless card reader.

use crate::{
    Result,
    traits::{CardRead, CardReader},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tappost_core::CardUid;
use tokio::sync::mpsc;

/// Mock card reader driven programmatically through its handle.
///
/// Cards presented via [`MockCardReaderHandle::present`] are queued and
/// reported by subsequent [`poll_card`](CardReader::poll_card) calls, one
/// per poll, mimicking a card entering the reader field.
///
/// # Examples
///
/// ```
/// use tappost_hardware::mock::MockCardReader;
/// use tappost_hardware::traits::CardReader;
/// use tappost_core::CardUid;
///
/// #[tokio::main]
/// async fn main() -> tappost_hardware::Result<()> {
///     let (mut reader, handle) = MockCardReader::new();
///
///     let uid = CardUid::from_bytes(&[0x04, 0xAB, 0xCD, 0xEF]).unwrap();
///     handle.present(uid.clone()).await?;
///
///     let read = reader.poll_card().await?.expect("card should be present");
///     assert_eq!(read.uid, uid);
///     assert_eq!(reader.poll_card().await?, None);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockCardReader {
    card_rx: mpsc::Receiver<CardRead>,
    fail_init: Arc<AtomicBool>,
    halts: Arc<AtomicUsize>,
}

impl MockCardReader {
    /// Create a new mock reader and its controlling handle.
    pub fn new() -> (Self, MockCardReaderHandle) {
        let (card_tx, card_rx) = mpsc::channel(32);
        let fail_init = Arc::new(AtomicBool::new(false));
        let halts = Arc::new(AtomicUsize::new(0));

        let reader = Self {
            card_rx,
            fail_init: Arc::clone(&fail_init),
            halts: Arc::clone(&halts),
        };

        let handle = MockCardReaderHandle {
            card_tx,
            fail_init,
            halts,
        };

        (reader, handle)
    }
}

impl CardReader for MockCardReader {
    async fn init(&mut self) -> Result<()> {
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(crate::HardwareError::initialization_failed(
                "mock reader configured to fail init",
            ));
        }
        Ok(())
    }

    async fn poll_card(&mut self) -> Result<Option<CardRead>> {
        match self.card_rx.try_recv() {
            Ok(read) => Ok(Some(read)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => {
                Err(crate::HardwareError::disconnected("mock card reader"))
            }
        }
    }

    async fn halt(&mut self) -> Result<()> {
        self.halts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Handle for driving a [`MockCardReader`].
#[derive(Debug, Clone)]
pub struct MockCardReaderHandle {
    card_tx: mpsc::Sender<CardRead>,
    fail_init: Arc<AtomicBool>,
    halts: Arc<AtomicUsize>,
}

impl MockCardReaderHandle {
    /// Present a card to the reader field.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader has been dropped.
    pub async fn present(&self, uid: CardUid) -> Result<()> {
        self.card_tx
            .send(CardRead::new(uid))
            .await
            .map_err(|_| crate::HardwareError::disconnected("mock card reader"))
    }

    /// Present a card by its raw UID bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid UID or the reader has
    /// been dropped.
    pub async fn present_bytes(&self, bytes: &[u8]) -> Result<()> {
        let uid = CardUid::from_bytes(bytes)
            .map_err(|e| crate::HardwareError::invalid_data(e.to_string()))?;
        self.present(uid).await
    }

    /// Make the next `init` call fail, simulating unresponsive hardware.
    pub fn fail_init(&self) {
        self.fail_init.store(true, Ordering::SeqCst);
    }

    /// How many times the reader has been halted.
    pub fn halt_count(&self) -> usize {
        self.halts.load(Ordering::SeqCst)
    }
}
