//! AMQP transport
//!
//! lapin-backed implementation of the [`Transport`] seam. Connection and
//! declaration failures are fatal; there is no reconnect or backoff here —
//! a supervising process restarts the worker.

use crate::transport::{
    InboundMessage, Transport, CLASSIFIED_QUEUE, CLASSIFIED_ROUTING_KEY, COMPLAINTS_EXCHANGE,
    CREATED_QUEUE,
};
use async_trait::async_trait;
use civiclass_core::{ComplaintClassifiedEvent, Error, Result};
use futures_util::StreamExt;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicNackOptions, BasicPublishOptions, BasicQosOptions,
    QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties, Consumer};
use tracing::info;

/// AMQP delivery mode for messages that survive a broker restart
const PERSISTENT: u8 = 2;

/// Broker transport over a single AMQP channel
pub struct AmqpTransport {
    // The channel is closed when the connection drops; keep both alive
    _connection: Connection,
    channel: Channel,
    consumer: Consumer,
}

impl AmqpTransport {
    /// Connect, declare both queues durable, and start consuming
    ///
    /// Prefetch is pinned to one unacknowledged message so the pipeline
    /// processes strictly one complaint at a time.
    pub async fn connect(url: &str) -> Result<Self> {
        let connection = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(|e| Error::transport(format!("failed to connect to broker: {e}")))?;

        let channel = connection
            .create_channel()
            .await
            .map_err(|e| Error::transport(format!("failed to open channel: {e}")))?;

        channel
            .basic_qos(1, BasicQosOptions::default())
            .await
            .map_err(|e| Error::transport(format!("failed to set prefetch: {e}")))?;

        let durable = QueueDeclareOptions {
            durable: true,
            ..Default::default()
        };
        for queue in [CREATED_QUEUE, CLASSIFIED_QUEUE] {
            channel
                .queue_declare(queue, durable, FieldTable::default())
                .await
                .map_err(|e| Error::transport(format!("failed to declare queue '{queue}': {e}")))?;
        }

        let consumer = channel
            .basic_consume(
                CREATED_QUEUE,
                "civiclass-pipeline",
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|e| Error::transport(format!("failed to start consumer: {e}")))?;

        info!(queue = CREATED_QUEUE, "consuming from broker");

        Ok(Self {
            _connection: connection,
            channel,
            consumer,
        })
    }
}

#[async_trait]
impl Transport for AmqpTransport {
    async fn receive(&mut self) -> Result<Option<InboundMessage>> {
        match self.consumer.next().await {
            Some(Ok(delivery)) => Ok(Some(InboundMessage {
                delivery_tag: delivery.delivery_tag,
                redelivered: delivery.redelivered,
                body: delivery.data,
            })),
            Some(Err(e)) => Err(Error::transport(format!("consumer stream error: {e}"))),
            None => Ok(None),
        }
    }

    async fn publish(&mut self, event: &ComplaintClassifiedEvent) -> Result<()> {
        let payload = serde_json::to_vec(event)?;

        self.channel
            .basic_publish(
                COMPLAINTS_EXCHANGE,
                CLASSIFIED_ROUTING_KEY,
                BasicPublishOptions::default(),
                &payload,
                BasicProperties::default().with_delivery_mode(PERSISTENT),
            )
            .await
            .map_err(|e| Error::transport(format!("publish failed: {e}")))?
            .await
            .map_err(|e| Error::transport(format!("publish confirmation failed: {e}")))?;

        Ok(())
    }

    async fn ack(&mut self, delivery_tag: u64) -> Result<()> {
        self.channel
            .basic_ack(delivery_tag, BasicAckOptions::default())
            .await
            .map_err(|e| Error::transport(format!("ack failed: {e}")))
    }

    async fn reject(&mut self, delivery_tag: u64, requeue: bool) -> Result<()> {
        self.channel
            .basic_nack(
                delivery_tag,
                BasicNackOptions {
                    requeue,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| Error::transport(format!("nack failed: {e}")))
    }
}
