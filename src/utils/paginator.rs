//! A button-driven paginator for navigating a list of embeds.

use std::time::{Duration, Instant};

use serenity::all::{
    ButtonStyle, ComponentInteractionCollector, Context, CreateActionRow, CreateButton,
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage, EditMessage, UserId,
};

use crate::{Result, constant::button};

use super::DiscordInteraction;

/// Where a button press moves the page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    First,
    Prev,
    Next,
    Last,
}

/// Builds a paginator button custom id from an action segment.
fn build_id(segment: &str) -> String {
    format!("{}#{segment}", button::BASE)
}

/// Parses a paginator button custom id back into its action.
fn parse_id(id: &str) -> Option<Action> {
    let mut split_id = id.split('#');
    if split_id.next() != Some(button::BASE) {
        return None;
    }
    match split_id.next()? {
        button::FIRST => Some(Action::First),
        button::PREV => Some(Action::Prev),
        button::NEXT => Some(Action::Next),
        button::LAST => Some(Action::Last),
        _ => None,
    }
}

/// Cycles through embeds with first/prev/next/last buttons and a page
/// counter.
///
/// Responds to the invoking interaction with the first embed, then drives a
/// component collector until the timeout passes, after which the buttons are
/// removed. Provide a user to keep everyone else's presses from moving the
/// pages.
pub struct Paginator {
    embeds: Vec<CreateEmbed>,
    user: Option<UserId>,
    timeout: Duration,
    index: usize,
}

impl Paginator {
    pub fn new(embeds: Vec<CreateEmbed>) -> Self {
        Self {
            embeds,
            user: None,
            timeout: Duration::from_secs(180),
            index: 0,
        }
    }

    /// Only this user may turn the pages; others get an ephemeral refusal.
    pub fn user(mut self, user: UserId) -> Self {
        self.user = Some(user);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Responds to `interaction` and handles button presses until the
    /// timeout elapses.
    pub async fn run(mut self, ctx: &Context, interaction: &dyn DiscordInteraction) -> Result<()> {
        let Some(first) = self.embeds.first() else {
            return Ok(());
        };

        let mut response = CreateInteractionResponseMessage::new().embed(first.clone());
        if self.embeds.len() > 1 {
            response = response.components(self.components());
        }
        interaction.respond(&ctx.http, response).await?;

        if self.embeds.len() <= 1 {
            return Ok(());
        }

        let mut message = interaction.get_interaction_message(&ctx.http).await?;
        let deadline = Instant::now() + self.timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            let Some(press) = ComponentInteractionCollector::new(&ctx.shard)
                .message_id(message.id)
                .filter(|press| press.data.custom_id.starts_with(button::BASE))
                .timeout(remaining)
                .await
            else {
                break;
            };

            if let Some(user) = self.user
                && press.user.id != user
            {
                press
                    .create_response(
                        &ctx.http,
                        CreateInteractionResponse::Message(
                            CreateInteractionResponseMessage::new()
                                .content("You do not have permission to interact with this button.")
                                .ephemeral(true),
                        ),
                    )
                    .await?;
                continue;
            }

            let Some(action) = parse_id(&press.data.custom_id) else {
                continue;
            };
            self.advance(action);

            press
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::UpdateMessage(
                        CreateInteractionResponseMessage::new()
                            .embed(self.embeds[self.index].clone())
                            .components(self.components()),
                    ),
                )
                .await?;
        }

        // The interaction token may have expired by now, so edit the message
        // directly; it may also have been deleted, which is fine.
        message
            .edit(&ctx.http, EditMessage::new().components(vec![]))
            .await
            .ok();

        Ok(())
    }

    fn advance(&mut self, action: Action) {
        let last = self.embeds.len().saturating_sub(1);
        self.index = match action {
            Action::First => 0,
            Action::Prev => self.index.saturating_sub(1),
            Action::Next => (self.index + 1).min(last),
            Action::Last => last,
        };
    }

    fn components(&self) -> Vec<CreateActionRow> {
        let last = self.embeds.len().saturating_sub(1);
        let at_start = self.index == 0;
        let at_end = self.index == last;

        vec![CreateActionRow::Buttons(vec![
            CreateButton::new(build_id(button::FIRST))
                .label("First Page")
                .style(ButtonStyle::Primary)
                .disabled(at_start),
            CreateButton::new(build_id(button::PREV))
                .label("Prev Page")
                .style(ButtonStyle::Primary)
                .disabled(at_start),
            CreateButton::new(build_id(button::COUNT))
                .label(format!("{} / {}", self.index + 1, self.embeds.len()))
                .style(ButtonStyle::Secondary)
                .disabled(true),
            CreateButton::new(build_id(button::NEXT))
                .label("Next Page")
                .style(ButtonStyle::Primary)
                .disabled(at_end),
            CreateButton::new(build_id(button::LAST))
                .label("Last Page")
                .style(ButtonStyle::Primary)
                .disabled(at_end),
        ])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(pages: usize) -> Paginator {
        Paginator::new((0..pages).map(|_| CreateEmbed::new()).collect())
    }

    #[test]
    fn ids_round_trip() {
        assert_eq!(parse_id(&build_id(button::FIRST)), Some(Action::First));
        assert_eq!(parse_id(&build_id(button::PREV)), Some(Action::Prev));
        assert_eq!(parse_id(&build_id(button::NEXT)), Some(Action::Next));
        assert_eq!(parse_id(&build_id(button::LAST)), Some(Action::Last));
        assert_eq!(parse_id(&build_id(button::COUNT)), None);
        assert_eq!(parse_id("cancel#1#2"), None);
    }

    #[test]
    fn advance_stays_in_bounds() {
        let mut pager = paginator(3);

        pager.advance(Action::Prev);
        assert_eq!(pager.index, 0);

        pager.advance(Action::Next);
        pager.advance(Action::Next);
        pager.advance(Action::Next);
        assert_eq!(pager.index, 2);

        pager.advance(Action::Last);
        assert_eq!(pager.index, 2);

        pager.advance(Action::First);
        assert_eq!(pager.index, 0);
    }

    #[test]
    fn buttons_disable_at_the_edges() {
        let mut pager = paginator(3);
        pager.index = 1;

        let rows = pager.components();
        let json = serde_json::to_value(&rows[0]).unwrap();
        let buttons = json["components"].as_array().unwrap();
        assert_eq!(buttons.len(), 5);

        // middle page: everything except the counter is pressable
        let disabled: Vec<bool> = buttons
            .iter()
            .map(|b| b["disabled"].as_bool().unwrap_or(false))
            .collect();
        assert_eq!(disabled, vec![false, false, true, false, false]);
        assert_eq!(buttons[2]["label"].as_str().unwrap(), "2 / 3");

        pager.index = 2;
        let rows = pager.components();
        let json = serde_json::to_value(&rows[0]).unwrap();
        let disabled: Vec<bool> = json["components"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["disabled"].as_bool().unwrap_or(false))
            .collect();
        assert_eq!(disabled, vec![false, false, true, true, true]);
    }
}
