// src/components/auth_panel.rs
//
// Login / register forms. Submission goes straight to the server; this
// component only switches between the forms and checks input before sending.

use regex::Regex;
use std::sync::OnceLock;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    });
    re.is_match(&email.to_lowercase())
}

/// Reason to block a forgot-password submission, if any.
pub fn forgot_password_problem(email: &str) -> Option<&'static str> {
    let email = email.trim();
    if email.is_empty() {
        Some("Please enter your email")
    } else if !is_valid_email(email) {
        Some("Please enter a valid email address")
    } else {
        None
    }
}

#[derive(Properties, PartialEq)]
pub struct PasswordFieldProps {
    pub id: AttrValue,
    pub name: AttrValue,
    pub placeholder: AttrValue,
}

#[function_component(PasswordField)]
fn password_field(props: &PasswordFieldProps) -> Html {
    let visible = use_state(|| false);
    let toggle = {
        let visible = visible.clone();
        Callback::from(move |_: MouseEvent| visible.set(!*visible))
    };
    let (input_type, icon) = if *visible {
        ("text", "fa-eye")
    } else {
        ("password", "fa-eye-slash")
    };

    html! {
        <div class="input-box">
            <input id={props.id.clone()} name={props.name.clone()} type={input_type}
                placeholder={props.placeholder.clone()} required={true} />
            <i class={classes!("fa-solid", "toggle-password", icon)} onclick={toggle}></i>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthPanelProps {
    pub on_close: Callback<()>,
}

#[function_component(AuthPanel)]
pub fn auth_panel(props: &AuthPanelProps) -> Html {
    let register = use_state(|| false);

    let show_register = {
        let register = register.clone();
        Callback::from(move |_: MouseEvent| register.set(true))
    };
    let show_login = {
        let register = register.clone();
        Callback::from(move |_: MouseEvent| register.set(false))
    };

    let email_ref = use_node_ref();
    let on_forgot = {
        let email_ref = email_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            let email = email_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            if let Some(problem) = forgot_password_problem(&email) {
                e.prevent_default();
                gloo::dialogs::alert(problem);
            }
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="auth-overlay">
            <div class={classes!("container", (*register).then_some("active"))}>
                <button class="close-btn" onclick={on_close}>{"×"}</button>

                <div class="form-box login">
                    <form action="/login" method="post">
                        <h1>{"Login"}</h1>
                        <div class="input-box">
                            <input name="username" type="text" placeholder="Username" required={true} />
                        </div>
                        <PasswordField id="login-password" name="password" placeholder="Password" />
                        <button type="submit" class="btn">{"Login"}</button>
                    </form>
                    <form action="/forgot-password" method="post" onsubmit={on_forgot}>
                        <div class="input-box">
                            <input ref={email_ref} name="email" type="email" placeholder="Email" />
                        </div>
                        <button type="submit" class="btn-link">{"Forgot password?"}</button>
                    </form>
                </div>

                <div class="form-box register">
                    <form action="/register" method="post">
                        <h1>{"Register"}</h1>
                        <div class="input-box">
                            <input name="username" type="text" placeholder="Username" required={true} />
                        </div>
                        <div class="input-box">
                            <input name="email" type="email" placeholder="Email" required={true} />
                        </div>
                        <PasswordField id="register-password" name="password" placeholder="Password" />
                        <button type="submit" class="btn">{"Register"}</button>
                    </form>
                </div>

                <div class="toggle-box">
                    <button class="btn register-btn" onclick={show_register}>{"Register"}</button>
                    <button class="btn login-btn" onclick={show_login}>{"Login"}</button>
                </div>
            </div>
        </div>
    }
}
