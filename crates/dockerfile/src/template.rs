//! Dockerfile 템플릿
//!
//! 순수 문자열 조립입니다. 같은 입력은 항상 바이트 단위로 같은 결과를 냅니다.

use std::fmt::Write as _;

use crate::error::DockerfileError;
use crate::framework::{DockerfileOptions, Framework};

/// Vue 정적 서버 스테이지의 고정 Node 이미지
const VUE_SERVE_IMAGE: &str = "node:20.11.0-alpine";
/// React Nginx 스테이지 이미지
const NGINX_IMAGE: &str = "nginx:stable-alpine";
/// FastAPI 서빙 포트
const FASTAPI_PORT: u16 = 8000;
/// Docker 태그 최대 길이
const MAX_TAG_LEN: usize = 128;

/// Dockerfile 텍스트를 생성합니다.
///
/// # Errors
///
/// - `InvalidVersion`: 이미지 태그로 쓸 수 없는 버전 문자열
/// - `MissingOption`: vue/django 에서 `port` 가 없음
pub fn generate(
    framework: Framework,
    version: &str,
    options: &DockerfileOptions,
) -> Result<String, DockerfileError> {
    validate_version(version)?;

    let text = match framework {
        Framework::GradleBackend => gradle(version),
        Framework::MavenBackend => maven(version),
        Framework::ReactFrontend => react(version, options.use_nginx),
        Framework::VueFrontend => vue(version, require_port(framework, options)?),
        Framework::FastapiBackend => fastapi(version),
        Framework::DjangoBackend => django(version, require_port(framework, options)?),
    };
    Ok(text)
}

fn require_port(framework: Framework, options: &DockerfileOptions) -> Result<u16, DockerfileError> {
    options.port.ok_or(DockerfileError::MissingOption {
        framework,
        option: "port",
    })
}

/// 버전은 `FROM image:{version}` 에 그대로 들어가므로 태그 문법으로 제한합니다.
fn validate_version(version: &str) -> Result<(), DockerfileError> {
    let mut chars = version.chars();
    let valid = version.len() <= MAX_TAG_LEN
        && chars
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if valid {
        Ok(())
    } else {
        Err(DockerfileError::InvalidVersion {
            version: version.to_owned(),
        })
    }
}

fn gradle(version: &str) -> String {
    format!(
        "FROM openjdk:{version}-slim\n\
         RUN apt-get update && apt-get install -y docker.io\n\
         VOLUME /var/run/docker.sock\n\
         WORKDIR /app\n\
         COPY . /app\n\
         RUN chmod +x ./gradlew\n\
         RUN ./gradlew clean bootJar -x test\n\
         RUN cp $(ls -t build/libs/*.jar | head -n 1) app.jar\n\
         ENTRYPOINT [\"java\", \"-jar\", \"app.jar\"]\n"
    )
}

fn maven(version: &str) -> String {
    format!(
        "FROM openjdk:{version}-slim\n\
         RUN apt-get update && apt-get install -y maven\n\
         VOLUME /var/run/docker.sock\n\
         WORKDIR /app\n\
         COPY . /app\n\
         RUN mvn clean package -DskipTests\n\
         RUN cp target/*.jar app.jar\n\
         ENTRYPOINT [\"java\", \"-jar\", \"app.jar\"]\n"
    )
}

/// 프론트엔드 공통 빌드 스테이지
fn node_build_stage(version: &str) -> String {
    format!(
        "FROM node:{version}-alpine as build-stage\n\
         WORKDIR /app\n\
         COPY package*.json ./\n\
         RUN npm install\n\
         COPY . .\n\
         RUN npm run build\n"
    )
}

fn react(version: &str, use_nginx: bool) -> String {
    let mut text = node_build_stage(version);
    if use_nginx {
        // write! on String is infallible
        let _ = write!(
            text,
            "FROM {NGINX_IMAGE} as production-stage\n\
             COPY --from=build-stage /app/build /usr/share/nginx/html\n\
             EXPOSE 80\n\
             CMD [\"nginx\", \"-g\", \"daemon off;\"]\n"
        );
    } else {
        text.push_str("CMD [\"npm\", \"start\"]\n");
    }
    text
}

fn vue(version: &str, port: u16) -> String {
    let mut text = node_build_stage(version);
    let _ = write!(
        text,
        "FROM {VUE_SERVE_IMAGE}\n\
         WORKDIR /app\n\
         COPY --from=build-stage /app/dist /app\n\
         CMD [\"npx\", \"http-server\", \"-p\", \"{port}\"]\n"
    );
    text
}

fn fastapi(version: &str) -> String {
    format!(
        "FROM python:{version}-slim\n\
         WORKDIR /app\n\
         COPY requirements.txt .\n\
         RUN pip install --no-cache-dir -r requirements.txt\n\
         COPY . .\n\
         EXPOSE {FASTAPI_PORT}\n\
         CMD [\"uvicorn\", \"main:app\", \"--host\", \"0.0.0.0\", \"--port\", \"{FASTAPI_PORT}\"]\n"
    )
}

fn django(version: &str, port: u16) -> String {
    format!(
        "FROM python:{version}-slim\n\
         ENV PYTHONUNBUFFERED=1\n\
         WORKDIR /app\n\
         COPY . /app\n\
         RUN if [ -f requirements.txt ]; then pip install --no-cache-dir -r requirements.txt; fi\n\
         EXPOSE {port}\n\
         CMD [\"python\", \"manage.py\", \"runserver\", \"0.0.0.0:{port}\"]\n"
    )
}
