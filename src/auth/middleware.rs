use super::context::RequestContext;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

pub async fn require_auth(ctx: RequestContext, request: Request, next: Next) -> Response {
    if ctx.is_authenticated() {
        next.run(request).await
    } else {
        tracing::debug!("Unauthenticated request to {}", request.uri().path());
        Redirect::to("/auth/login").into_response()
    }
}

pub async fn redirect_if_authenticated(
    ctx: RequestContext,
    request: Request,
    next: Next,
) -> Response {
    if ctx.is_authenticated() {
        Redirect::to("/dashboard").into_response()
    } else {
        next.run(request).await
    }
}
