use crate::{
    config::{SiteConfig, CONFIG_ELEMENT_ID},
    contact::{ContactAction, ContactField, ContactForm},
    dom::AppContext,
    logging::{LogLevel, Logger},
    performance::{self, prefers_reduced_motion},
    portfolio, scroll_effects, text_reveal,
};
use gloo_timers::callback::Timeout;
use js_sys::{Function, Reflect};
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

const NAV_ITEMS: [(&str, &str); 6] = [
    ("home", "Home"),
    ("about", "About"),
    ("skills", "Skills"),
    ("experience", "Experience"),
    ("projects", "Projects"),
    ("contact", "Contact"),
];

const STATS: [(u32, &str); 3] = [
    (15, "Projects Completed"),
    (3, "Years of Coding"),
    (12, "Technologies Used"),
];

struct SkillGroup {
    title: &'static str,
    skills: &'static [(&'static str, u8)],
}

const SKILL_GROUPS: [SkillGroup; 3] = [
    SkillGroup {
        title: "Frontend",
        skills: &[("HTML & CSS", 90), ("JavaScript", 85), ("React", 75)],
    },
    SkillGroup {
        title: "Backend",
        skills: &[("Python", 85), ("Node.js", 70), ("SQL", 70)],
    },
    SkillGroup {
        title: "Tools",
        skills: &[("Git", 85), ("Docker", 60), ("Linux", 70)],
    },
];

struct Milestone {
    period: &'static str,
    role: &'static str,
    place: &'static str,
    summary: &'static str,
}

const MILESTONES: [Milestone; 3] = [
    Milestone {
        period: "2024 - Present",
        role: "Software Engineering Intern",
        place: "Product Studio",
        summary: "Built internal dashboards and automated release checks for a small web team.",
    },
    Milestone {
        period: "2023 - 2024",
        role: "Teaching Assistant",
        place: "Department of Computer Science",
        summary: "Ran weekly labs on data structures and reviewed student projects.",
    },
    Milestone {
        period: "2021 - 2025",
        role: "B.Sc. Computer Science",
        place: "University",
        summary: "Coursework in algorithms, databases, machine learning and distributed systems.",
    },
];

struct Project {
    title: &'static str,
    category: &'static str,
    summary: &'static str,
    stack: &'static [&'static str],
}

const PROJECT_FILTERS: [(&str, &str); 4] = [
    ("all", "All"),
    ("web", "Web"),
    ("ml", "Machine Learning"),
    ("backend", "Backend"),
];

const PROJECTS: [Project; 5] = [
    Project {
        title: "Weather Dashboard",
        category: "web",
        summary: "Responsive forecast dashboard with location search and hourly charts.",
        stack: &["React", "Chart.js", "CSS Grid"],
    },
    Project {
        title: "Sentiment Classifier",
        category: "ml",
        summary: "Fine-tuned text classifier for product reviews with a small evaluation suite.",
        stack: &["Python", "PyTorch", "pandas"],
    },
    Project {
        title: "Task Tracker API",
        category: "backend",
        summary: "REST API for team task boards with token auth and pagination.",
        stack: &["Node.js", "Express", "PostgreSQL"],
    },
    Project {
        title: "Recipe Finder",
        category: "web",
        summary: "Ingredient-driven recipe search with saved collections and filters.",
        stack: &["JavaScript", "REST", "Sass"],
    },
    Project {
        title: "Image Captioning",
        category: "ml",
        summary: "Encoder-decoder captioning model trained on a public image dataset.",
        stack: &["Python", "TensorFlow", "NumPy"],
    },
];

/// Session-only color scheme, written to `data-theme` on the root element.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn from_system() -> Self {
        let dark = window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|query| query.matches());
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    fn attribute(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn write(self) {
        let root = window()
            .and_then(|w| w.document())
            .and_then(|document| document.document_element());
        if let Some(root) = root {
            let _ = root.set_attribute("data-theme", self.attribute());
        }
    }

    /// Writes the theme inside a view transition when the browser has one and motion
    /// is allowed.
    fn write_animated(self) {
        let Some(win) = window() else {
            return;
        };
        let document = win.document().filter(|_| !prefers_reduced_motion(&win));
        let Some(document) = document.map(JsValue::from) else {
            self.write();
            return;
        };

        let start = Reflect::get(&document, &JsValue::from_str("startViewTransition"))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok());
        let started = start.is_some_and(|start| {
            start
                .call1(&document, &Closure::once_into_js(move || self.write()))
                .is_ok()
        });
        if !started {
            self.write();
        }
    }
}

#[function_component(ThemeToggle)]
fn theme_toggle() -> Html {
    let theme = use_state(Theme::from_system);

    {
        let initial = *theme;
        use_effect_with((), move |_| {
            initial.write();
            || ()
        });
    }

    let onclick = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = theme.flipped();
            next.write_animated();
            theme.set(next);
        })
    };

    html! {
        <button
            class="theme-toggle"
            type="button"
            aria-label="Toggle color theme"
            aria-pressed={(*theme == Theme::Dark).to_string()}
            {onclick}
        >
            <span aria-hidden="true">{"◐"}</span>
        </button>
    }
}

#[derive(Default, PartialEq)]
struct ContactFormState(ContactForm);

impl Reducible for ContactFormState {
    type Action = ContactAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut form = self.0.clone();
        form.apply(action);
        Rc::new(Self(form))
    }
}

fn input_value(event: &InputEvent) -> String {
    if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
        return input.value();
    }
    event
        .target_dyn_into::<HtmlTextAreaElement>()
        .map(|area| area.value())
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
struct ContactFormProps {
    submit_delay_ms: u32,
    message_hide_ms: u32,
}

#[function_component(ContactFormView)]
fn contact_form(props: &ContactFormProps) -> Html {
    let state = use_reducer(ContactFormState::default);

    let on_input = |field: ContactField| {
        let dispatcher = state.dispatcher();
        Callback::from(move |event: InputEvent| {
            dispatcher.dispatch(ContactAction::Edit(field, input_value(&event)));
        })
    };

    let onsubmit = {
        let state = state.clone();
        let submit_delay_ms = props.submit_delay_ms;
        let message_hide_ms = props.message_hide_ms;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let accepted = state.0.accepts_submit();
            state.dispatch(ContactAction::Submit);
            if !accepted {
                return;
            }

            // No request is sent; the delay stands in for network latency.
            let dispatcher = state.dispatcher();
            let _ = Timeout::new(submit_delay_ms, move || {
                dispatcher.dispatch(ContactAction::Complete);
                let _ = Timeout::new(message_hide_ms, move || {
                    dispatcher.dispatch(ContactAction::Dismiss);
                })
                .forget();
            })
            .forget();
        })
    };

    let form = &state.0;
    let message = match form.status.message() {
        Some((tone, text)) => html! {
            <div id="form-message" class={tone.class()} role="status">{text}</div>
        },
        None => html! {
            <div id="form-message" class="form-message" style="display: none;"></div>
        },
    };

    html! {
        <form id="contact-form" class="contact-form" novalidate={true} onsubmit={onsubmit}>
            <div class="form-row">
                <input
                    type="text"
                    name={ContactField::Name.name()}
                    placeholder="Your Name"
                    value={ContactField::Name.value(&form.submission).to_string()}
                    oninput={on_input(ContactField::Name)}
                />
                <input
                    type="email"
                    name={ContactField::Email.name()}
                    placeholder="Your Email"
                    value={ContactField::Email.value(&form.submission).to_string()}
                    oninput={on_input(ContactField::Email)}
                />
            </div>
            <input
                type="text"
                name={ContactField::Subject.name()}
                placeholder="Subject"
                value={ContactField::Subject.value(&form.submission).to_string()}
                oninput={on_input(ContactField::Subject)}
            />
            <textarea
                name={ContactField::Message.name()}
                rows="6"
                placeholder="Your Message"
                value={ContactField::Message.value(&form.submission).to_string()}
                oninput={on_input(ContactField::Message)}
            />
            <button type="submit" class="btn btn-primary" disabled={form.status.is_busy()}>
                {form.status.button_label()}
            </button>
            {message}
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<SiteConfig>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    {
        let config = props.config.clone();
        use_effect_with((), move |_| {
            let context = start_effects((*config).clone());
            move || drop(context)
        });
    }

    let config = &props.config;

    html! {
        <>
            <div id="loading-screen" class="loading-screen" aria-hidden="true">
                <div class="loader"></div>
            </div>
            <div id="scroll-progress" class="scroll-progress"></div>

            <nav id="nav" class="nav">
                <div class="nav-container">
                    <a href="#home" class="nav-logo">{"AC"}</a>
                    <ul id="nav-menu" class="nav-menu">
                        { for NAV_ITEMS.iter().enumerate().map(|(index, (id, label))| html! {
                            <li>
                                <a href={format!("#{id}")} class={classes!("nav-link", (index == 0).then_some("active"))}>
                                    {*label}
                                </a>
                            </li>
                        }) }
                    </ul>
                    <ThemeToggle />
                    <button id="nav-toggle" class="nav-toggle" type="button" aria-label="Toggle navigation">
                        <span class="bar"></span>
                        <span class="bar"></span>
                        <span class="bar"></span>
                    </button>
                </div>
            </nav>

            <main>
                <section id="home" class="hero">
                    <div id="particles" class="particles"></div>
                    <div class="floating-element shape-1"></div>
                    <div class="floating-element shape-2"></div>
                    <div class="floating-element shape-3"></div>
                    <div class="hero-content">
                        <p class="hero-greeting">{"Hello, I'm"}</p>
                        <h1 class="hero-title">
                            <span id="typewriter" class="typewriter">{config.typewriter_text.clone()}</span>
                        </h1>
                        <p class="hero-description">
                            {"Developer building thoughtful web experiences and practical machine learning tools."}
                        </p>
                        <div class="hero-buttons">
                            <a href="#projects" class="btn btn-primary">{"View My Work"}</a>
                            <a href="#contact" class="btn btn-outline">{"Get In Touch"}</a>
                            <a href="/resume.pdf" class="btn btn-outline" download="resume.pdf">{"Resume"}</a>
                        </div>
                    </div>
                    <div class="hero-visual" aria-hidden="true">
                        <div class="hero-avatar">{"AC"}</div>
                    </div>
                </section>

                <section id="about" class="section">
                    <h2 class="section-title">{"About Me"}</h2>
                    <p class="section-subtitle">{"A little background"}</p>
                    <div class="about-content">
                        <p data-aos="fade-up">
                            {"I enjoy turning ideas into fast, accessible interfaces and reliable services. \
                              Most of my time goes into web development, with a growing interest in applied machine learning."}
                        </p>
                        <div class="stats">
                            { for STATS.iter().map(|(target, label)| html! {
                                <div class="stat" data-aos="fade-up">
                                    <span class="stat-number" data-target={target.to_string()}>{"0"}</span>
                                    <span class="stat-label">{*label}</span>
                                </div>
                            }) }
                        </div>
                    </div>
                </section>

                <section id="skills" class="section">
                    <h2 class="section-title">{"Skills"}</h2>
                    <p class="section-subtitle">{"Tools I reach for"}</p>
                    <div class="skills-grid">
                        { for SKILL_GROUPS.iter().map(|group| html! {
                            <div class="skill-category">
                                <h3>{group.title}</h3>
                                { for group.skills.iter().map(|(name, progress)| html! {
                                    <div class="skill-item">
                                        <div class="skill-info">
                                            <span>{*name}</span>
                                            <span>{format!("{progress}%")}</span>
                                        </div>
                                        <div class="skill-bar">
                                            <div class="skill-progress" data-progress={progress.to_string()}></div>
                                        </div>
                                    </div>
                                }) }
                            </div>
                        }) }
                    </div>
                </section>

                <section id="experience" class="section">
                    <h2 class="section-title">{"Experience"}</h2>
                    <p class="section-subtitle">{"Where I have been"}</p>
                    <div class="timeline">
                        { for MILESTONES.iter().map(|milestone| html! {
                            <div class="timeline-item">
                                <span class="timeline-period">{milestone.period}</span>
                                <h3>{milestone.role}</h3>
                                <p class="timeline-place">{milestone.place}</p>
                                <p>{milestone.summary}</p>
                            </div>
                        }) }
                    </div>
                </section>

                <section id="projects" class="section">
                    <h2 class="section-title">{"Projects"}</h2>
                    <p class="section-subtitle">{"Selected work"}</p>
                    <div class="project-filters">
                        { for PROJECT_FILTERS.iter().enumerate().map(|(index, (tag, label))| html! {
                            <button
                                type="button"
                                class={classes!("filter-btn", (index == 0).then_some("active"))}
                                data-filter={*tag}
                            >
                                {*label}
                            </button>
                        }) }
                    </div>
                    <div class="projects-grid">
                        { for PROJECTS.iter().map(|project| html! {
                            <article class="project-card" data-category={project.category}>
                                <h3>{project.title}</h3>
                                <p>{project.summary}</p>
                                <ul class="project-tech">
                                    { for project.stack.iter().map(|item| html! { <li>{*item}</li> }) }
                                </ul>
                            </article>
                        }) }
                    </div>
                </section>

                <section id="contact" class="section">
                    <h2 class="section-title">{"Get In Touch"}</h2>
                    <p class="section-subtitle">{"Questions, ideas or opportunities"}</p>
                    <div class="contact-content">
                        <div class="contact-info" data-aos="fade-up">
                            <p>{"The form below is a demo: messages are not sent anywhere."}</p>
                            <p><a href="#home">{"Back to top"}</a></p>
                        </div>
                        <ContactFormView
                            submit_delay_ms={config.submit_delay_ms}
                            message_hide_ms={config.message_hide_ms}
                        />
                    </div>
                </section>
            </main>

            <footer class="footer">
                <p>{"Built with Rust and WebAssembly."}</p>
            </footer>
        </>
    }
}

fn start_effects(config: SiteConfig) -> Option<Rc<AppContext>> {
    let context = match AppContext::new(config) {
        Ok(context) => context,
        Err(error) => {
            Logger::new(LogLevel::Warn).event(
                LogLevel::Warn,
                "effects_unavailable",
                json!({ "reason": error.to_string() }),
            );
            return None;
        }
    };

    portfolio::install(&context);
    context.attempt("scroll_effects", scroll_effects::install(&context));
    context.attempt("text_reveal", text_reveal::install(&context));
    performance::install(&context);
    context.visibility().poll();

    context.log(LogLevel::Info, "effects_ready", json!({}));
    Some(context)
}

fn load_site_config() -> SiteConfig {
    let raw = window()
        .and_then(|w| w.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content())
        .filter(|raw| !raw.trim().is_empty());
    let Some(raw) = raw else {
        return SiteConfig::default();
    };

    SiteConfig::from_json(&raw).unwrap_or_else(|error| {
        Logger::new(LogLevel::Warn).event(
            LogLevel::Warn,
            "site_config_invalid",
            json!({ "reason": error.to_string() }),
        );
        SiteConfig::default()
    })
}

pub fn run() {
    console_error_panic_hook::set_once();

    let config = Rc::new(load_site_config());
    yew::Renderer::<App>::with_root_and_props(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
        AppProps { config },
    )
    .render();
}
