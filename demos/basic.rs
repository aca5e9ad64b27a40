//! A minimal bot with a `/help` command backed by helpcord.
//!
//! Run with `DISCORD_TOKEN=... cargo run --example basic`.

use std::sync::OnceLock;

use anyhow::Context as AnyhowContext;
use helpcord::{
    CommandFilter, CommandIndex, CommandMeta, MetaRegistry,
    utils::{self, DiscordInteraction, Paginator, embeds},
};
use serenity::{
    Client,
    all::{
        Colour, Command, CommandDataOptionValue, CommandInteraction, CommandOptionType, Context,
        CreateCommand, CreateCommandOption, CreateInteractionResponseMessage, EventHandler,
        GatewayIntents, Interaction, Ready,
    },
    async_trait,
};

struct Handler {
    registry: MetaRegistry,
    index: OnceLock<CommandIndex>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        println!("{} is connected; indexing commands...", ready.user.name);

        if let Err(err) = self.build_index(&ctx).await {
            println!("Error while building the command index: `{err}`");
            std::process::exit(1);
        }

        println!("{} is good to go!", ready.user.name);
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(cmd) = interaction
            && cmd.data.name == "help"
            && let Some(index) = self.index.get()
        {
            utils::run_and_report_error(&cmd, &ctx.http, help(&ctx, &cmd, index)).await;
        }
    }
}

impl Handler {
    async fn build_index(&self, ctx: &Context) -> anyhow::Result<()> {
        Command::create_global_command(
            &ctx.http,
            CreateCommand::new("help")
                .description("Show the bot's commands.")
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "command",
                        "A command to show in detail.",
                    )
                    .required(false),
                ),
        )
        .await?;

        let index = CommandIndex::fetch(&ctx.http, &[], &self.registry, &[]).await?;
        self.index.set(index).ok();
        Ok(())
    }
}

async fn help(
    ctx: &Context,
    cmd: &CommandInteraction,
    index: &CommandIndex,
) -> helpcord::Result<()> {
    let name = cmd.data.options.first().and_then(|option| match &option.value {
        CommandDataOptionValue::String(name) => Some(name.clone()),
        _ => None,
    });

    if let Some(name) = name {
        match index.get_named(&name, None, None) {
            Some(command) => {
                let embed = embeds::command_detail_embed(&command, None, Some(Colour::BLURPLE));
                cmd.respond(
                    &ctx.http,
                    CreateInteractionResponseMessage::new().embed(embed),
                )
                .await?;
            }
            None => cmd.create(&ctx.http, "No command by that name.").await?,
        }
        return Ok(());
    }

    let commands = index.filtered(&CommandFilter::new());
    let pages = embeds::commands_overview_embeds(
        &commands,
        &embeds::OverviewOptions {
            max_field_chars: 400,
            color: Some(Colour::BLURPLE),
            ..Default::default()
        },
    );
    Paginator::new(pages).user(cmd.user.id).run(ctx, cmd).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let token = std::env::var("DISCORD_TOKEN").context("Expected DISCORD_TOKEN to be set")?;

    let registry = MetaRegistry::new().with(
        "help",
        CommandMeta {
            category: Some("General".into()),
            ..Default::default()
        },
    );

    let mut client = Client::builder(&token, GatewayIntents::default())
        .event_handler(Handler {
            registry,
            index: OnceLock::new(),
        })
        .await
        .context("Error creating client")?;

    if let Err(why) = client.start().await {
        println!("Client error: {why:?}");
    }

    Ok(())
}
