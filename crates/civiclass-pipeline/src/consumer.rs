//! Event pipeline consume loop
//!
//! Per message: parse the created event, classify, publish the classified
//! event, then acknowledge. A failure anywhere before the ack rejects the
//! delivery instead; a delivery is never both acked and rejected.

use crate::transport::{InboundMessage, Transport};
use civiclass_core::{ComplaintClassifiedEvent, ComplaintCreatedEvent, Error, Result};
use civiclass_engine::ClassificationEngine;
use std::sync::Arc;
use tracing::{info, warn};

/// Bridges the broker to the classification engine
pub struct EventPipeline<T: Transport> {
    engine: Arc<ClassificationEngine>,
    transport: T,
}

impl<T: Transport> EventPipeline<T> {
    /// Create a pipeline over an engine and a connected transport
    pub fn new(engine: Arc<ClassificationEngine>, transport: T) -> Self {
        Self { engine, transport }
    }

    /// Consume until the transport closes
    ///
    /// Messages are handled strictly one at a time, in broker delivery
    /// order. Returns an error only for transport failures, which are fatal
    /// to the worker; the supervisor is expected to restart it.
    pub async fn run(mut self) -> Result<()> {
        info!("waiting for complaints to classify");

        while let Some(message) = self.transport.receive().await? {
            self.handle(message).await?;
        }

        info!("consumer stream closed");
        Ok(())
    }

    async fn handle(&mut self, message: InboundMessage) -> Result<()> {
        metrics::counter!("civiclass_messages_total").increment(1);

        let event = match self.process(&message.body) {
            Ok(event) => event,
            Err(e) => {
                // A body that fails to parse is deterministically invalid:
                // requeue it once, then let the broker's dead-letter policy
                // (if any) take the redelivery instead of looping forever.
                let requeue = !message.redelivered;
                if requeue {
                    warn!(error = %e, "failed to process delivery, requeueing");
                    metrics::counter!("civiclass_requeued_total").increment(1);
                } else {
                    warn!(error = %e, "dropping redelivered unprocessable message");
                    metrics::counter!("civiclass_dropped_total").increment(1);
                }
                return self.transport.reject(message.delivery_tag, requeue).await;
            }
        };

        if let Err(e) = self.transport.publish(&event).await {
            // Publish failures may be transient; always requeue
            warn!(reference = %event.reference, error = %e, "publish failed, requeueing delivery");
            metrics::counter!("civiclass_requeued_total").increment(1);
            return self.transport.reject(message.delivery_tag, true).await;
        }

        metrics::counter!("civiclass_classified_total").increment(1);
        self.transport.ack(message.delivery_tag).await
    }

    /// Parse and classify one message body
    ///
    /// Pure with respect to the transport, so it is the unit the engine
    /// tests exercise directly.
    fn process(&self, body: &[u8]) -> Result<ComplaintClassifiedEvent> {
        let created: ComplaintCreatedEvent = serde_json::from_slice(body)
            .map_err(|e| Error::pipeline(format!("malformed complaint.created body: {e}")))?;

        let result = self.engine.classify(&created.description, &created.title);
        info!(
            reference = %created.reference,
            category = %result.category_name,
            confidence = result.confidence,
            needs_manual_review = result.needs_manual_review,
            "classified complaint"
        );

        Ok(ComplaintClassifiedEvent::from_result(&created, result))
    }
}
