use leptos::{ev, prelude::*, task::spawn_local};

use crate::contact::{
    mailto_link, messaging_link, submit_while_mounted, ContactError, ContactFormState,
    ContactMessage, Field,
};
use crate::content::{SocialLink, PORTFOLIO};
use crate::lifecycle::MountFlag;

use super::background::ParticleBackground;
use super::dom::open_in_new_tab;
use super::toast::{dismiss_later, flash_error, use_toaster};

/// Relays a contact message through the configured email service. Relay
/// credentials live in the server environment and never reach the browser.
#[server]
pub async fn send_contact_email(message: ContactMessage) -> Result<(), ServerFnError> {
    use crate::contact::{deliver, RelayConfig};
    use crate::relay::HttpRelay;

    let relay = HttpRelay::default();
    let form = ContactFormState::from(message);
    deliver(
        &relay,
        RelayConfig::from_env(),
        &form,
        &PORTFOLIO.contact.email_subject_prefix,
    )
    .await
    .map_err(|e| {
        match &e {
            ContactError::Validation(field) => tracing::debug!(%field, "rejected contact form"),
            _ => tracing::error!("couldn't send contact message: {e}"),
        }
        ServerFnError::new(e.user_message())
    })
}

#[component]
pub fn ContactSection() -> impl IntoView {
    let contact = &PORTFOLIO.contact;
    let toaster = use_toaster();
    let form = RwSignal::new(ContactFormState::default());
    let (sending, set_sending) = signal(false);

    let mounted = MountFlag::new();
    on_cleanup({
        let mounted = mounted.clone();
        move || mounted.release()
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() {
            return;
        }
        let draft = form.get_untracked();
        if let Err(e) = draft.validate() {
            flash_error(toaster, e.user_message());
            return;
        }

        let Some(id) = toaster.try_update(|t| t.pending("Sending message...")) else {
            return;
        };
        set_sending.set(true);
        let mounted = mounted.clone();
        spawn_local(async move {
            let send = |message: ContactMessage| async move {
                send_contact_email(message)
                    .await
                    .map_err(|e| ContactError::Transport(e.to_string()))
            };
            let applied = submit_while_mounted(draft, &mounted, send, |draft, res| {
                set_sending.set(false);
                match res {
                    Ok(()) => {
                        form.set(draft);
                        toaster.update(|t| {
                            t.succeed(id, "Message sent successfully!");
                        });
                    }
                    Err(e) => {
                        log::warn!("contact form send failed: {e}");
                        toaster.update(|t| {
                            t.fail(id, e.user_message());
                        });
                    }
                }
                dismiss_later(toaster, id);
            })
            .await;
            if !applied {
                log::debug!("contact section unmounted before send completed");
            }
        });
    };

    let open_mail_app = move |_: ev::MouseEvent| match form.with_untracked(|f| f.validate()) {
        Ok(message) => {
            let link = mailto_link(
                &PORTFOLIO.contact.email_address,
                &PORTFOLIO.contact.email_subject_prefix,
                &message,
            );
            if let Err(e) = window().location().set_href(&link) {
                log::warn!("couldn't open mail client: {e:?}");
            }
        }
        Err(e) => flash_error(toaster, e.user_message()),
    };

    let open_messaging = move |_: ev::MouseEvent| {
        open_in_new_tab(&messaging_link(&PORTFOLIO.contact.messaging, None));
    };

    view! {
        <section id="contact" class="relative py-16 sm:py-20 px-4 sm:px-6 overflow-hidden">
            <div class="absolute inset-0 z-0 pointer-events-none">
                <ParticleBackground config=PORTFOLIO.backgrounds.contact.clone() />
            </div>
            <div class="relative z-20 container mx-auto max-w-6xl">
                <h2 class="text-3xl sm:text-4xl font-bold text-center mb-4 bg-gradient-to-r from-indigo-400 via-violet-400 to-purple-400 bg-clip-text text-transparent">
                    "Get In Touch"
                </h2>
                <p class="text-center text-gray-400 mb-12 sm:mb-16">
                    "Have a project in mind or just want to say hello? My inbox is open."
                </p>
                <div class="grid grid-cols-1 lg:grid-cols-2 gap-8 sm:gap-12">
                    <form
                        class="bg-black/80 border border-gray-800 rounded-lg p-6 space-y-4"
                        on:submit=on_submit
                    >
                        <FormInput form field=Field::Name label="Name" input_type="text" />
                        <FormInput form field=Field::Email label="Email" input_type="email" />
                        <FormTextArea form field=Field::Message label="Message" />
                        <div class="flex flex-col sm:flex-row gap-3">
                            <button
                                type="submit"
                                class="flex-1 bg-indigo-600 hover:bg-indigo-700 disabled:opacity-50 text-white px-6 py-3 rounded-md font-semibold transition-all duration-300"
                                disabled=move || sending.get()
                            >
                                {move || if sending.get() { "Sending..." } else { "Send Message" }}
                            </button>
                            <button
                                type="button"
                                class="flex-1 border border-indigo-400 text-indigo-400 hover:bg-indigo-400 hover:text-white px-6 py-3 rounded-md transition-all duration-300"
                                on:click=open_mail_app
                            >
                                "Use Mail App"
                            </button>
                        </div>
                    </form>

                    <div class="space-y-6">
                        <div class="bg-black/80 border border-gray-800 rounded-lg p-6">
                            <h3 class="text-lg font-semibold text-white mb-2">"Prefer chatting?"</h3>
                            <p class="text-gray-400 mb-4">"Send me a message directly."</p>
                            <button
                                type="button"
                                class="bg-green-600 hover:bg-green-700 text-white px-6 py-3 rounded-md font-semibold transition-all duration-300"
                                on:click=open_messaging
                            >
                                "Message on WhatsApp"
                            </button>
                        </div>
                        <div class="bg-black/80 border border-gray-800 rounded-lg p-6">
                            <h3 class="text-lg font-semibold text-white mb-4">"Elsewhere"</h3>
                            <div class="flex gap-3">
                                {contact
                                    .socials
                                    .iter()
                                    .map(|s| view! { <SocialButton link=s.clone() /> })
                                    .collect_view()}
                            </div>
                        </div>
                        <div class="bg-black/80 border border-gray-800 rounded-lg p-6">
                            <h3 class="text-lg font-semibold text-white mb-4">"Response Times"</h3>
                            <ul class="space-y-2 text-gray-300">
                                {contact
                                    .response_times
                                    .iter()
                                    .map(|r| {
                                        view! {
                                            <li class="flex justify-between">
                                                <span>{r.channel.clone()}</span>
                                                <span class="text-indigo-300">{r.time.clone()}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        </div>
                    </div>
                </div>
            </div>
        </section>
    }
}

const INPUT_CLASS: &str = "w-full bg-gray-900/80 border border-gray-700 focus:border-indigo-500 rounded-md px-4 py-3 text-white outline-none transition-colors duration-300";

#[component]
fn FormInput(
    form: RwSignal<ContactFormState>,
    field: Field,
    label: &'static str,
    input_type: &'static str,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="block text-sm text-gray-400 mb-1">{label}</span>
            <input
                type=input_type
                name=field.key()
                class=INPUT_CLASS
                prop:value=move || form.with(|f| f.get(field).to_string())
                on:input=move |ev| form.update(|f| f.set(field, event_target_value(&ev)))
            />
        </label>
    }
}

#[component]
fn FormTextArea(form: RwSignal<ContactFormState>, field: Field, label: &'static str) -> impl IntoView {
    view! {
        <label class="block">
            <span class="block text-sm text-gray-400 mb-1">{label}</span>
            <textarea
                name=field.key()
                rows="5"
                class=INPUT_CLASS
                prop:value=move || form.with(|f| f.get(field).to_string())
                on:input=move |ev| form.update(|f| f.set(field, event_target_value(&ev)))
            ></textarea>
        </label>
    }
}

#[component]
fn SocialButton(link: SocialLink) -> impl IntoView {
    let SocialLink { label, url, icon } = link;
    view! {
        <button
            type="button"
            class="w-12 h-12 flex items-center justify-center rounded-md border border-gray-700 text-xl text-gray-300 hover:text-white hover:border-indigo-400 transition-all duration-300"
            aria-label=label
            on:click=move |_| open_in_new_tab(&url)
        >
            <i class=icon></i>
        </button>
    }
}
