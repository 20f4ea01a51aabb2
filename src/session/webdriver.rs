use log::debug;
use thirtyfour::prelude::*;

use super::{BrowserSession, SessionError};
use crate::config::config::DriverConfig;

const SCROLL_INTO_VIEW: &str = "arguments[0].scrollIntoView(true);";
const CLICK: &str = "arguments[0].click();";

/// [`BrowserSession`] backed by a Chrome instance driven over WebDriver.
pub struct WebDriverSession {
    driver: WebDriver,
}

impl WebDriverSession {
    /// Opens a Chrome session on the WebDriver server listening at `server_url`.
    pub async fn connect(server_url: &str, config: &DriverConfig) -> Result<Self, SessionError> {
        let caps = chrome_capabilities(config)?;
        let driver = WebDriver::new(server_url, caps).await?;
        debug!("WebDriver session opened on {}", server_url);

        Ok(Self { driver })
    }
}

/// Chrome options that keep the session quiet and less obviously automated.
fn chrome_capabilities(config: &DriverConfig) -> Result<thirtyfour::ChromeCapabilities, SessionError> {
    let mut caps = DesiredCapabilities::chrome();

    caps.add_arg(&format!("--user-agent={}", config.user_agent))?;
    if config.headless {
        caps.add_arg("--headless")?;
    }

    caps.add_arg("--disable-extensions")?;
    caps.add_arg("--disable-gpu")?;
    caps.add_arg("--disable-dev-shm-usage")?;

    // Skip first-run pop-ups
    caps.add_arg("--no-first-run")?;
    caps.add_arg("--no-service-autorun")?;
    caps.add_arg("--password-store=basic")?;

    caps.add_arg("--window-size=1920,1080")?;
    caps.add_arg("--start-maximized")?;

    caps.add_arg("--disable-blink-features=AutomationControlled")?;
    caps.add_experimental_option("excludeSwitches", vec!["enable-automation", "enable-logging"])?;
    caps.add_experimental_option("useAutomationExtension", false)?;

    Ok(caps)
}

impl BrowserSession for WebDriverSession {
    type Element = WebElement;

    async fn goto(&self, url: &str) -> Result<(), SessionError> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, SessionError> {
        Ok(self.driver.current_url().await?.to_string())
    }

    async fn find_all(
        &self,
        scope: Option<&WebElement>,
        selector: &str,
    ) -> Result<Vec<WebElement>, SessionError> {
        let by = By::Css(selector.to_string());
        let found = match scope {
            Some(element) => element.find_all(by).await?,
            None => self.driver.find_all(by).await?,
        };
        Ok(found)
    }

    async fn text(&self, element: &WebElement) -> Result<String, SessionError> {
        Ok(element.text().await?)
    }

    async fn attribute(
        &self,
        element: &WebElement,
        name: &str,
    ) -> Result<Option<String>, SessionError> {
        Ok(element.attr(name).await?)
    }

    async fn scroll_into_view(&self, element: &WebElement) -> Result<(), SessionError> {
        self.driver
            .execute(SCROLL_INTO_VIEW, vec![element.to_json()?])
            .await?;
        Ok(())
    }

    async fn click(&self, element: &WebElement) -> Result<(), SessionError> {
        self.driver.execute(CLICK, vec![element.to_json()?]).await?;
        Ok(())
    }

    async fn close(self) -> Result<(), SessionError> {
        self.driver.quit().await?;
        debug!("WebDriver session closed");
        Ok(())
    }
}
