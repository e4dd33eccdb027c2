//! Interactive operator session.

use anyhow::Result;
use blood_bank_core::{BloodBankService, BloodType, DonorId, HospitalId};
use chrono::Utc;
use dialoguer::{Confirm, Input, Password, Select};
use tracing::info;

use crate::config::ConsoleConfig;
use crate::prompts::{self, LoginGate, LoginOutcome};
use crate::render;

const MENU: &[&str] = &[
    "Register New Donor",
    "Register New Hospital",
    "Record Blood Donation",
    "Process Blood Request",
    "View Blood Inventory",
    "View Detailed Inventory",
    "List All Donors",
    "List All Hospitals",
    "Exit",
];

pub struct Session {
    bank: BloodBankService,
    gate: LoginGate,
}

impl Session {
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        Ok(Self {
            bank: BloodBankService::with_policy(config.policy)?,
            gate: LoginGate::new(config.username, config.password, config.max_login_attempts),
        })
    }

    /// Log in, then serve the menu until the operator exits.
    pub fn run(&mut self) -> Result<()> {
        println!("  ******************************");
        println!("  *    BLOOD BANK MANAGEMENT   *");
        println!("  ******************************\n");

        if !self.login()? {
            println!("Too many failed attempts. System locked.");
            return Ok(());
        }

        loop {
            let choice = Select::new()
                .with_prompt("BLOOD BANK MANAGEMENT SYSTEM")
                .items(MENU)
                .default(0)
                .interact()?;

            match choice {
                0 => self.register_donor()?,
                1 => self.register_hospital()?,
                2 => self.record_donation()?,
                3 => self.request_blood()?,
                4 => print!("{}", render::summary(&self.bank.inventory_summary(Utc::now()))),
                5 => {
                    let now = Utc::now();
                    print!("{}", render::detailed(&self.bank.detailed_inventory(now), now));
                }
                6 => self.list_donors(),
                7 => self.list_hospitals(),
                _ => {
                    println!("Thank you for using the Blood Bank Management System!");
                    return Ok(());
                }
            }
        }
    }

    fn login(&mut self) -> Result<bool> {
        loop {
            let username: String = Input::new().with_prompt("Username").interact_text()?;
            let password = Password::new().with_prompt("Password").interact()?;

            match self.gate.attempt(&username, &password) {
                LoginOutcome::Granted => {
                    info!(%username, "operator logged in");
                    println!("Login successful!");
                    return Ok(true);
                }
                LoginOutcome::Denied { remaining } => {
                    println!("Invalid credentials. Attempts remaining: {}", remaining);
                }
                LoginOutcome::Locked => return Ok(false),
            }
        }
    }

    fn register_donor(&mut self) -> Result<()> {
        let name = ask_name("Enter Name")?;
        let contact = ask_contact()?;
        let blood_type = ask_blood_type("Enter Blood Type (A, B, AB, O)", "Enter Rhesus Factor (+ or -)")?;
        let fit = Confirm::new()
            .with_prompt("Is the donor fit to donate?")
            .default(true)
            .interact()?;

        let id = self.bank.register_donor(name, contact, blood_type, fit);
        println!("Donor Registration Successful! Your Donor ID is: {}", id);
        Ok(())
    }

    fn register_hospital(&mut self) -> Result<()> {
        let name = ask_name("Enter Hospital Name")?;
        let contact = ask_contact()?;

        let id = self.bank.register_hospital(name, contact);
        println!("Hospital Registration Successful! Your Hospital ID is: {}", id);
        Ok(())
    }

    fn record_donation(&mut self) -> Result<()> {
        if self.bank.donors().is_empty() {
            println!("No donors registered in the system!");
            return Ok(());
        }
        let id: String = Input::new().with_prompt("Enter Donor ID").interact_text()?;

        match self.bank.record_donation(&DonorId::new(id.trim()), Utc::now()) {
            Ok(unit) => {
                println!("Blood donation successfully recorded!");
                print!("{}", render::unit(&unit, unit.collected_at));
            }
            Err(e) => println!("{}", render::error(&e)),
        }
        Ok(())
    }

    fn request_blood(&mut self) -> Result<()> {
        if self.bank.hospitals().is_empty() {
            println!("No hospitals registered in the system!");
            return Ok(());
        }
        let id: String = Input::new().with_prompt("Enter Hospital ID").interact_text()?;
        let hospital_id = HospitalId::new(id.trim());
        if let Err(e) = self.bank.hospitals().find(&hospital_id) {
            println!("{}", render::error(&e));
            return Ok(());
        }

        let requested = ask_blood_type(
            "Enter requested blood type (A, B, AB, O)",
            "Enter requested rhesus factor (+ or -)",
        )?;
        let paid = Confirm::new()
            .with_prompt("Has payment been made?")
            .default(false)
            .interact()?;

        let now = Utc::now();
        match self.bank.request_blood(&hospital_id, paid, requested, now) {
            Ok(unit) => {
                println!("Blood unit allocated successfully!");
                print!("{}", render::unit(&unit, now));
            }
            Err(e) => println!("{}", render::error(&e)),
        }
        Ok(())
    }

    fn list_donors(&self) {
        println!("===== REGISTERED DONORS =====");
        let donors = self.bank.list_donors();
        if donors.is_empty() {
            println!("No donors registered in the system.");
            return;
        }
        let interval = self.bank.policy().donation_interval();
        for donor in &donors {
            println!("{}", render::donor(donor, interval));
        }
    }

    fn list_hospitals(&self) {
        println!("===== REGISTERED HOSPITALS =====");
        let hospitals = self.bank.list_hospitals();
        if hospitals.is_empty() {
            println!("No hospitals registered in the system.");
            return;
        }
        for hospital in &hospitals {
            println!("{}", render::hospital(hospital));
        }
    }
}

fn ask_name(prompt: &str) -> Result<String> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|s: &String| prompts::validate_name(s).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()?;
    Ok(prompts::validate_name(&raw)?)
}

fn ask_contact() -> Result<String> {
    let raw: String = Input::new()
        .with_prompt("Enter Contact Number")
        .validate_with(|s: &String| prompts::validate_contact(s).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()?;
    Ok(prompts::validate_contact(&raw)?)
}

fn ask_blood_type(group_prompt: &str, rh_prompt: &str) -> Result<BloodType> {
    let group: String = Input::new()
        .with_prompt(group_prompt)
        .validate_with(|s: &String| prompts::parse_group(s).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()?;
    let rh: String = Input::new()
        .with_prompt(rh_prompt)
        .validate_with(|s: &String| prompts::parse_rh(s).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()?;
    Ok(BloodType::new(prompts::parse_group(&group)?, prompts::parse_rh(&rh)?))
}
