use birthday_greetings_infra::BirthdayContext;
use std::fmt::Debug;
use tracing::error;

#[async_trait::async_trait(?Send)]
pub trait UseCase: Debug {
    type Response;
    type Error;

    const NAME: &'static str;

    async fn execute(&mut self, ctx: &BirthdayContext) -> Result<Self::Response, Self::Error>;
}

#[tracing::instrument(name = "UseCase executed", skip(usecase, ctx), fields(usecase = %U::NAME))]
pub async fn execute<U>(mut usecase: U, ctx: &BirthdayContext) -> Result<U::Response, U::Error>
where
    U: UseCase,
    U::Error: Debug,
{
    let res = usecase.execute(ctx).await;

    if let Err(e) = &res {
        error!("Use case error: {:?}", e);
    }

    res
}
