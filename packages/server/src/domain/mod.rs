//! Domain layer.
//!
//! Pure state transitions of the coaching core plus the ports (traits) the
//! core needs from the outside world. Nothing in here performs I/O.

pub mod error;
pub mod event;
pub mod fallback;
pub mod message_pusher;
pub mod metrics;
pub mod phase;
pub mod prompt;
pub mod repository;
pub mod ring_buffer;
pub mod sentiment;
pub mod session;
pub mod suggestion;
pub mod template;
pub mod time_context;
pub mod value_object;

pub use error::{
    ExternalDataError, GeneratorError, MessagePushError, RepositoryError, StreamInfoError,
    TemplateError, ValueObjectError,
};
pub use event::{
    ChatMessage, Cheer, Follow, GiftTierPolicy, Raid, StreamEvent, Subscription,
    SubscriptionKind, SubscriptionTier, TierHint,
};
pub use fallback::{FallbackCategory, FallbackInputs, FallbackTemplate};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use metrics::{MetricsAggregate, Revenue, Rollup, StreamInfo, UserEngagement};
pub use phase::{PhaseTransition, PromptCadence, StreamPhase};
pub use prompt::{Priority, Prompt, PromptKind, PromptOrigin, PromptRecord, UrgentEvent};
pub use repository::{SessionRepository, SharedSession};
pub use ring_buffer::RingBuffer;
pub use session::{Session, SessionSnapshot};
pub use suggestion::{
    ExternalDataSource, StreamInfoSource, SuggestionContext, SuggestionGenerator,
};
pub use template::{Placeholder, PlaceholderValues, TemplateId, TemplateRegistry};
pub use time_context::TimeContext;
pub use value_object::{
    ChannelName, ChatterId, LanguageCode, SessionId, SubscriberId, Timestamp,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
#[cfg(test)]
pub use repository::MockSessionRepository;
#[cfg(test)]
pub use suggestion::{MockExternalDataSource, MockStreamInfoSource, MockSuggestionGenerator};
