//! A common face over the interaction types a help command can be invoked
//! from, so the paginator and error reporting work with any of them.

use std::future::Future;

use serenity::{
    all::{
        ChannelId, CommandInteraction, ComponentInteraction, CreateInteractionResponse,
        CreateInteractionResponseMessage, EditMessage, GuildId, Http, Message, ModalInteraction,
        User,
    },
    async_trait,
};

use crate::Result;

#[async_trait]
pub trait DiscordInteraction: Send + Sync {
    /// Responds with a plain text message.
    async fn create(&self, http: &Http, message: &str) -> Result<()>;
    /// Responds with a fully built message (embeds, components, flags).
    async fn respond(&self, http: &Http, message: CreateInteractionResponseMessage) -> Result<()>;
    async fn get_interaction_message(&self, http: &Http) -> Result<Message>;
    async fn edit(&self, http: &Http, message: &str) -> Result<()>;
    async fn create_or_edit(&self, http: &Http, message: &str) -> Result<()>;

    fn channel_id(&self) -> ChannelId;
    fn guild_id(&self) -> Option<GuildId>;
    fn message(&self) -> Option<&Message>;
    fn user(&self) -> &User;
}
macro_rules! implement_interaction {
    ($name:ident) => {
        #[async_trait]
        impl DiscordInteraction for $name {
            async fn create(&self, http: &Http, msg: &str) -> Result<()> {
                self.respond(http, CreateInteractionResponseMessage::new().content(msg))
                    .await
            }
            async fn respond(
                &self,
                http: &Http,
                message: CreateInteractionResponseMessage,
            ) -> Result<()> {
                Ok(self
                    .create_response(http, CreateInteractionResponse::Message(message))
                    .await?)
            }
            async fn get_interaction_message(&self, http: &Http) -> Result<Message> {
                Ok(self.get_response(http).await?)
            }
            async fn edit(&self, http: &Http, message: &str) -> Result<()> {
                self.get_interaction_message(http)
                    .await?
                    .edit(http, EditMessage::new().content(message))
                    .await?;
                Ok(())
            }
            async fn create_or_edit(&self, http: &Http, message: &str) -> Result<()> {
                if let Ok(mut msg) = self.get_interaction_message(http).await {
                    msg.edit(http, EditMessage::new().content(message)).await?;
                    Ok(())
                } else {
                    DiscordInteraction::create(self, http, message).await
                }
            }

            fn channel_id(&self) -> ChannelId {
                self.channel_id
            }
            fn guild_id(&self) -> Option<GuildId> {
                self.guild_id
            }
            fn user(&self) -> &User {
                &self.user
            }
            interaction_message!($name);
        }
    };
}
macro_rules! interaction_message {
    (CommandInteraction) => {
        fn message(&self) -> Option<&Message> {
            None
        }
    };
    (ComponentInteraction) => {
        fn message(&self) -> Option<&Message> {
            Some(&self.message)
        }
    };
    (ModalInteraction) => {
        fn message(&self) -> Option<&Message> {
            self.message.as_deref()
        }
    };
}
implement_interaction!(CommandInteraction);
implement_interaction!(ComponentInteraction);
implement_interaction!(ModalInteraction);

/// Runs `body` and edits the interaction response if an error occurs.
pub async fn run_and_report_error(
    interaction: &dyn DiscordInteraction,
    http: &Http,
    body: impl Future<Output = Result<()>>,
) {
    if let Err(err) = body.await {
        interaction
            .create_or_edit(http, &format!("Error: {err}"))
            .await
            .ok();
    }
}
