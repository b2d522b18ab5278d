use clap::Parser;
use config::AppConfig;
use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, container, image as image_widget, row, text, Row,
    },
    Alignment, Color, ContentFit, Element, Length, Point, Rectangle, Renderer, Size, Subscription, Task, Theme,
};
use log::{error, info, warn};
use repcore::capture::FrameSource;
use repcore::pose::{NullPoseProvider, PoseProvider};
use repcore::shell::{Display, TrainingShell};
use std::path::PathBuf;
use std::time::Duration;

mod camera;
mod config;
mod movenet;

type Shell = TrainingShell<Box<dyn FrameSource>, Box<dyn PoseProvider>>;

#[derive(Parser)]
#[command(author, version, about = "Get Fit arm-curl trainer")]
struct Args {
    /// Load window settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let app_config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    iced::application(move || Trainer::boot(app_config.clone()), Trainer::update, Trainer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .window_size(Size::new(700.0, 600.0))
        .run()
        .map_err(|err| anyhow::anyhow!("window failed: {err}"))
}

fn application_title(_: &Trainer) -> String {
    "Get Fit".into()
}

/// Ticks only while a session runs.
fn application_subscription(state: &Trainer) -> Subscription<Message> {
    if state.shell.as_ref().is_some_and(|shell| shell.is_training()) {
        time::every(state.tick_interval).map(|_| Message::Tick)
    } else {
        Subscription::none()
    }
}

fn application_theme(_: &Trainer) -> Theme {
    Theme::Dark
}

struct Trainer {
    shell: Option<Shell>,
    tick_interval: Duration,
    trace_len: usize,
    frame: Option<image_widget::Handle>,
    status: Option<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    ToggleTraining,
    ToggleHistory,
    Next,
    Previous,
}

impl Trainer {
    fn boot(config: AppConfig) -> (Self, Task<Message>) {
        let frames = camera::open_source(&config);
        let pose: Box<dyn PoseProvider> =
            match movenet::MoveNetProvider::load(&config.model_path, config.model_input, config.confidence_floor) {
                Ok(provider) => Box::new(provider),
                Err(err) => {
                    warn!("{err:#}; running without pose tracking");
                    Box::new(NullPoseProvider)
                }
            };
        let tick_interval = Duration::from_millis(config.tracker.tick_interval_ms.max(1));
        let (shell, status) = match TrainingShell::new(config.tracker, frames, pose) {
            Ok(shell) => (Some(shell), None),
            Err(err) => {
                error!("could not set up the trainer: {err}");
                (None, Some(format!("Setup error: {err}")))
            }
        };
        (
            Trainer {
                shell,
                tick_interval,
                trace_len: config.trace_len,
                frame: None,
                status,
            },
            Task::none(),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        let Some(shell) = state.shell.as_mut() else {
            return Task::none();
        };
        let result = match message {
            Message::Tick => {
                shell.tick();
                Ok(())
            }
            Message::ToggleTraining => shell.toggle_training().map(|summary| {
                if let Some(summary) = summary {
                    info!("session finished with {} curls", summary.count);
                }
            }),
            Message::ToggleHistory => shell.toggle_history(),
            Message::Next => shell.next(),
            Message::Previous => shell.previous(),
        };
        state.status = match result {
            Ok(()) => None,
            Err(err) => {
                error!("{err}");
                Some(format!("Error: {err}"))
            }
        };
        state.frame = match shell.display() {
            Display::Frame(frame) => Some(frame_handle(frame)),
            Display::Blank | Display::Message(_) => None,
        };
        Task::none()
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let Some(shell) = state.shell.as_ref() else {
            return container(text(state.status.clone().unwrap_or_default()).size(18))
                .center(Length::Fill)
                .into();
        };

        let pane: Element<'_, Message> = match (&state.frame, shell.display()) {
            (Some(handle), _) => image_widget(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            (None, Display::Message(message)) => text(message.clone()).size(20).into(),
            (None, _) => text("").into(),
        };

        let mut content = column![container(pane)
            .center_x(Length::Fill)
            .height(Length::Fill)]
        .spacing(8)
        .padding(12);

        if shell.is_training() {
            let trace = Canvas::new(Trace {
                data: shell.session().samples().recent_percentages(state.trace_len),
            })
            .width(Length::Fill)
            .height(Length::Fixed(60.0));
            content = content.push(trace);
        }

        let caption = state
            .status
            .clone()
            .unwrap_or_else(|| shell.caption().to_string());
        content = content.push(text(caption).size(14));

        let controls = shell.controls();
        let mut buttons = Row::new().spacing(10).align_y(Alignment::Center);
        if let Some(label) = controls.training {
            buttons = buttons.push(button(label).on_press(Message::ToggleTraining).padding(8));
        }
        buttons = buttons.push(button(controls.history).on_press(Message::ToggleHistory).padding(8));
        if controls.navigation {
            buttons = buttons.push(row![
                button("Previous").on_press(Message::Previous).padding(8),
                button("Next").on_press(Message::Next).padding(8),
            ]
            .spacing(10));
        }

        container(content.push(buttons))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn frame_handle(frame: &image::RgbImage) -> image_widget::Handle {
    let rgba = image::DynamicImage::ImageRgb8(frame.clone()).to_rgba8();
    let (width, height) = rgba.dimensions();
    image_widget::Handle::from_rgba(width, height, rgba.into_raw())
}

/// Recent completion percentages on a fixed 0..=100 scale.
#[derive(Clone)]
struct Trace {
    data: Vec<f32>,
}

impl canvas::Program<Message> for Trace {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        if self.data.len() > 1 {
            let step = bounds.width / (self.data.len() as f32 - 1.0);
            let path = Path::new(|builder| {
                for (i, value) in self.data.iter().enumerate() {
                    let x = i as f32 * step;
                    let y = bounds.height - (value / 100.0).clamp(0.0, 1.0) * bounds.height;
                    if i == 0 {
                        builder.move_to(Point::new(x, y));
                    } else {
                        builder.line_to(Point::new(x, y));
                    }
                }
            });

            frame.stroke(
                &path,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(Color::from_rgb(0.18, 0.72, 0.89)),
            );
        }

        vec![frame.into_geometry()]
    }
}
