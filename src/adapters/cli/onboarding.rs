//! Console registration and login.

use tokio::io::{AsyncBufRead, AsyncWrite};

use super::{CliError, Console};
use crate::application::{
    ApplicationError, AuthenticateUserCommand, AuthenticateUserHandler, RegisterUserCommand,
    RegisterUserHandler,
};
use crate::domain::foundation::UserId;
use crate::domain::user::UserProfile;

pub struct Onboarding {
    product_name: String,
    register: RegisterUserHandler,
    authenticate: AuthenticateUserHandler,
}

impl Onboarding {
    pub fn new(
        product_name: impl Into<String>,
        register: RegisterUserHandler,
        authenticate: AuthenticateUserHandler,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            register,
            authenticate,
        }
    }

    /// Returns the signed-in profile. Loops until registration or login
    /// succeeds or input closes.
    pub async fn run<R, W>(&self, console: &mut Console<R, W>) -> Result<UserProfile, CliError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let question = format!("Do you have an account with {}? (yes/no)", self.product_name);
        let answer = console.ask(&question).await?;

        if answer.trim().eq_ignore_ascii_case("yes") {
            return self.login(console).await;
        }

        loop {
            match self.registration(console).await {
                Ok(profile) => return Ok(profile),
                Err(CliError::Application(ApplicationError::AccountExists(_))) => {
                    console
                        .say("This email address is already registered. Please log in instead.")
                        .await?;
                    return self.login(console).await;
                }
                Err(CliError::Application(ApplicationError::Validation(e))) => {
                    console
                        .say(&format!("{}. Let's try that again.", e))
                        .await?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn registration<R, W>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<UserProfile, CliError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let name = console.ask("What's your name?").await?;
        let occupation = console.ask("What's your occupation?").await?;
        let age = ask_age(console).await?;
        let sex = console.ask("What's your sex (male/female/other)?").await?;
        let country = console.ask("Which country are you from?").await?;
        let email = ask_email(console).await?;
        let password = ask_password(console).await?;

        let profile = self
            .register
            .handle(RegisterUserCommand {
                email,
                password,
                name,
                age,
                sex,
                country,
                occupation,
            })
            .await?;
        Ok(profile)
    }

    async fn login<R, W>(&self, console: &mut Console<R, W>) -> Result<UserProfile, CliError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        loop {
            let email = console.ask("What's your email address?").await?;
            let password = console.ask("Enter your password:").await?;

            match self
                .authenticate
                .handle(AuthenticateUserCommand { email, password })
                .await
            {
                Ok(profile) => {
                    console
                        .say(&format!("Welcome back, {}!", profile.name()))
                        .await?;
                    return Ok(profile);
                }
                Err(ApplicationError::InvalidCredentials) => {
                    console
                        .say("Invalid email or password. Please try again.")
                        .await?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

async fn ask_age<R, W>(console: &mut Console<R, W>) -> Result<u32, CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        let answer = console.ask("How old are you?").await?;
        match answer.trim().parse::<u32>() {
            Ok(age) => return Ok(age),
            Err(_) => console.say("Please enter your age as a number.").await?,
        }
    }
}

async fn ask_email<R, W>(console: &mut Console<R, W>) -> Result<String, CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        let answer = console.ask("What's your email address?").await?;
        match UserId::new(&answer) {
            Ok(_) => return Ok(answer),
            Err(e) => console.say(&e.to_string()).await?,
        }
    }
}

async fn ask_password<R, W>(console: &mut Console<R, W>) -> Result<String, CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        let answer = console.ask("Create a password:").await?;
        if !answer.is_empty() {
            return Ok(answer);
        }
        console.say("Password must not be empty.").await?;
    }
}
