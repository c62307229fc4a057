use std::sync::Arc;

use chrono::Utc;
use serenity::all::{
    ButtonStyle, ChannelId, Colour, ComponentInteraction, Context, CreateActionRow, CreateAttachment,
    CreateButton, CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
    CreateMessage, EventHandler, Interaction, Message, Ready, Timestamp,
};
use serenity::async_trait;

use crate::commands::leaderboard::{self, LeaderboardPage};
use crate::commands::user::{self, UserArgs};
use crate::commands::{self, join, ButtonKind, CommandKind, Registry};
use crate::error::{Error, Result};
use crate::graphing::render_chart;
use crate::settings::Settings;
use crate::stat_manager::StatManager;
use crate::stats::summarize;

const EMBED_COLOUR: Colour = Colour::new(0x1ABC9C);
const CHART_FILE: &str = "activity.png";

pub struct StatBot {
    settings: Settings,
    stats: Arc<StatManager>,
    commands: Registry<CommandKind>,
    buttons: Registry<ButtonKind>,
}

impl StatBot {
    pub fn new(settings: Settings, stats: Arc<StatManager>) -> Self {
        Self {
            settings,
            stats,
            commands: commands::command_registry(),
            buttons: commands::button_registry(),
        }
    }

    async fn user_subroutine(&self, ctx: &Context, msg: &Message, args: &[&str]) -> Result<()> {
        let args = match UserArgs::parse(args, self.settings.default_timeframe) {
            Ok(args) => args,
            Err(e) => {
                msg.reply(ctx, format!(":x: Error: {}", e)).await?;
                return Ok(());
            }
        };

        let friends = self.stats.friends().await?;
        if !friends.contains(&args.user) {
            msg.reply(
                ctx,
                format!(
                    "User `{}` has not allowed data collection",
                    args.user.replace('`', "")
                ),
            )
            .await?;
            return Ok(());
        }

        let records = self.stats.activity(&args.user).await?;
        let filter = args.filter();
        let now = Utc::now();

        let summary = match summarize(
            &records,
            &filter,
            args.timeframe,
            now,
            self.settings.max_list_length,
        ) {
            Ok(summary) => summary,
            Err(Error::EmptyInput) => {
                msg.reply(ctx, "This user has done nothing that matches these restrictions.")
                    .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let matching: Vec<_> = records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        let chart = render_chart(&matching, args.timeframe, now, self.settings.canvas)?;

        let max_len = self.settings.max_list_length;
        let mut embed = CreateEmbed::new()
            .title(&args.user)
            .colour(EMBED_COLOUR)
            .description(user::description(&summary))
            .field(
                user::field_title("Languages", &summary.top_languages, max_len),
                user::field_body(&summary.top_languages),
                true,
            )
            .field(
                user::field_title("Projects", &summary.top_projects, max_len),
                user::field_body(&summary.top_projects),
                true,
            )
            .timestamp(Timestamp::now());

        let mut message = CreateMessage::new();
        if let Some(png) = chart {
            embed = embed.image(format!("attachment://{}", CHART_FILE));
            message = message.add_file(CreateAttachment::bytes(png, CHART_FILE));
        }

        msg.channel_id
            .send_message(ctx, message.embed(embed))
            .await?;

        tracing::info!(
            user = %args.user,
            timeframe = %args.timeframe,
            total_seconds = summary.total_seconds,
            "sent user summary"
        );

        Ok(())
    }

    fn leaderboard_message(&self, page: &LeaderboardPage, invoker: u64) -> (CreateEmbed, CreateActionRow) {
        let embed = CreateEmbed::new()
            .title(leaderboard::TITLE)
            .colour(EMBED_COLOUR)
            .description(page.body())
            .timestamp(Timestamp::now());

        let backwards = CreateButton::new(leaderboard::button_id(invoker, page.page.saturating_sub(1)))
            .emoji('◀')
            .style(ButtonStyle::Primary)
            .disabled(!page.has_previous);
        let forwards = CreateButton::new(leaderboard::button_id(invoker, page.page + 1))
            .emoji('▶')
            .style(ButtonStyle::Primary)
            .disabled(!page.has_next);

        (embed, CreateActionRow::Buttons(vec![backwards, forwards]))
    }

    async fn leaderboard_subroutine(&self, ctx: &Context, msg: &Message) -> Result<()> {
        let members = self.stats.leaderboard().await?;
        if members.is_empty() {
            msg.reply(ctx, "No data available, try again later.").await?;
            return Ok(());
        }

        let page = LeaderboardPage::build(&members, 0, self.settings.leaderboard_page_size);
        let (embed, row) = self.leaderboard_message(&page, msg.author.id.get());

        msg.channel_id
            .send_message(ctx, CreateMessage::new().embed(embed).components(vec![row]))
            .await?;

        Ok(())
    }

    async fn join_subroutine(&self, ctx: &Context, msg: &Message) -> Result<()> {
        let identity = self.stats.identity();
        let row = CreateActionRow::Buttons(vec![
            CreateButton::new_link(join::leaderboard_url(identity)).label("General leaderboards"),
            CreateButton::new_link(join::friend_url(identity)).label("More data as friend"),
        ]);

        msg.channel_id
            .send_message(ctx, CreateMessage::new().content(join::MESSAGE).components(vec![row]))
            .await?;

        Ok(())
    }

    async fn leaderboard_button(
        &self,
        ctx: &Context,
        component: &ComponentInteraction,
        args: &[&str],
    ) -> Result<()> {
        let Some((invoker, page)) = leaderboard::parse_button_args(args) else {
            tracing::warn!(custom_id = %component.data.custom_id, "malformed leaderboard button");
            return Ok(());
        };

        if component.user.id.get() != invoker {
            return ephemeral(ctx, component, "You didn't call this embed.").await;
        }

        let members = self.stats.leaderboard().await?;
        if members.is_empty() {
            return ephemeral(ctx, component, "No data available, try again later.").await;
        }

        let page = LeaderboardPage::build(&members, page, self.settings.leaderboard_page_size);
        let (embed, row) = self.leaderboard_message(&page, invoker);

        component
            .create_response(
                ctx,
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .embed(embed)
                        .components(vec![row]),
                ),
            )
            .await?;

        Ok(())
    }
}

async fn ephemeral(ctx: &Context, component: &ComponentInteraction, content: &str) -> Result<()> {
    component
        .create_response(
            ctx,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

#[async_trait]
impl EventHandler for StatBot {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let Some(commandline) = msg.content.strip_prefix(&self.settings.prefix) else {
            return;
        };
        let commandline: Vec<&str> = commandline.split_whitespace().collect();

        let Some((cmd, args)) = commandline.split_first() else {
            if let Err(e) = msg.reply(&ctx, "Error: expected command").await {
                tracing::warn!(error = %e, "failed to reply");
            }
            return;
        };

        let result = match self.commands.resolve(cmd) {
            Some(CommandKind::User) => self.user_subroutine(&ctx, &msg, args).await,
            Some(CommandKind::Leaderboard) => self.leaderboard_subroutine(&ctx, &msg).await,
            Some(CommandKind::Join) => self.join_subroutine(&ctx, &msg).await,
            None => return,
        };

        if let Err(e) = result {
            tracing::error!(command = cmd, error = %e, "error while handling a command");

            if let Err(e) = msg
                .reply(&ctx, "Something went wrong while executing that command...")
                .await
            {
                tracing::warn!(error = %e, "failed to report command error");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Component(component) = interaction else {
            return;
        };

        let (name, args) = commands::split_custom_id(&component.data.custom_id);
        let result = match self.buttons.resolve(name) {
            Some(ButtonKind::Leaderboard) => self.leaderboard_button(&ctx, &component, &args).await,
            None => {
                tracing::error!(button = name, "unhandled button");
                ephemeral(&ctx, &component, "For some reason this button was left unhandled.").await
            }
        };

        if let Err(e) = result {
            tracing::error!(button = name, error = %e, "error while handling a button");

            if let Err(e) = ephemeral(
                &ctx,
                &component,
                "Something went wrong while executing that button...",
            )
            .await
            {
                tracing::warn!(error = %e, "failed to report button error");
            }
        }
    }

    async fn ready(&self, ctx: Context, rdy: Ready) {
        tracing::info!(
            user = %rdy.user.name,
            guilds = rdy.guilds.len(),
            prefix = %self.settings.prefix,
            "ready and logged in"
        );

        if let Some(channel) = self.settings.status_channel {
            let content = format!("Testaustime bot online! `{}`", self.settings.revision());

            if let Err(e) = ChannelId::new(channel).say(&ctx, content).await {
                tracing::warn!(channel, error = %e, "failed to post status message");
            }
        }
    }
}
