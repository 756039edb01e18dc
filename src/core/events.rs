use crate::core::EventSink;
use crate::domain::model::FundraiserCreated;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Forwards creation events into an unbounded tokio channel.
///
/// Sending never blocks, which keeps it safe to call under the registry lock.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<FundraiserCreated>,
}

impl ChannelSink {
    pub fn channel() -> (Self, UnboundedReceiver<FundraiserCreated>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl EventSink for ChannelSink {
    fn publish(&self, event: &FundraiserCreated) {
        if self.sender.send(event.clone()).is_err() {
            tracing::debug!("Subscriber dropped before event #{} was delivered", event.index);
        }
    }

    fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }
}

/// Logs every creation; installed by the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn publish(&self, event: &FundraiserCreated) {
        tracing::info!(
            index = event.index,
            beneficiary = %event.beneficiary,
            custodian = %event.custodian,
            "FundraiserCreated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Identity;

    fn event(index: usize) -> FundraiserCreated {
        FundraiserCreated {
            index,
            beneficiary: Identity::new("0xbeneficiary"),
            custodian: Identity::new("factory"),
        }
    }

    #[test]
    fn test_channel_sink_delivers_in_order() {
        let (sink, mut rx) = ChannelSink::channel();
        sink.publish(&event(0));
        sink.publish(&event(1));

        assert_eq!(rx.try_recv().unwrap().index, 0);
        assert_eq!(rx.try_recv().unwrap().index, 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_sink_closes_with_receiver() {
        let (sink, rx) = ChannelSink::channel();
        assert!(sink.is_open());
        drop(rx);
        assert!(!sink.is_open());
        // 接收端已關閉，發送不應 panic
        sink.publish(&event(0));
    }
}
